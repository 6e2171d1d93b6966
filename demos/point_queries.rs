use lazy_interval_tree::{Interval, IntervalTree};

trait Point<T> {
    fn new_point(x: T) -> Interval<T>;
}

impl Point<i32> for Interval<i32> {
    fn new_point(x: i32) -> Self {
        Interval::new(x, x + 1)
    }
}

fn main() {
    let mut tree = IntervalTree::<i32, i32>::new();
    tree.insert(0, Interval::new(3, 7), 20);
    tree.insert(0, Interval::new(2, 6), 15);

    let point = Interval::new_point(5);
    assert_eq!(point, Interval::new(5, 6));

    tree.insert(0, point, 10);
    assert_eq!(tree.find_largest(0, 5), Some(&10));
    assert_eq!(tree.find_all_overlap(&Interval::new_point(5)).len(), 3);

    // Deleting [0, 3) drops [2, 6) and pulls the rest three positions left.
    tree.remove_and_shift(0, 3, -3);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.find_all_overlap(&Interval::new_point(2)).len(), 2);
    assert_eq!(tree.find_largest(0, 0), Some(&20));
    assert_eq!(tree.find_largest(0, 2), Some(&10));
}
