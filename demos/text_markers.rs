use lazy_interval_tree::{CategoryId, Interval, IntervalTree};

const HIGHLIGHT: CategoryId = 0;
const DIAGNOSTIC: CategoryId = 1;

/// Replace `text[start..end]` with `replacement`, keeping the markers in sync.
fn edit(
    text: &mut String,
    markers: &mut IntervalTree<i64, &'static str>,
    start: usize,
    end: usize,
    replacement: &str,
) {
    text.replace_range(start..end, replacement);
    let (low, high) = (start as i64, end as i64);
    markers.remove_and_shift(low, high, replacement.len() as i64 - (high - low));
}

fn main() {
    let mut text = String::from("let x = foo(bar);");
    let mut markers = IntervalTree::new();
    markers.insert(HIGHLIGHT, Interval::new(0, 3), "keyword");
    markers.insert(HIGHLIGHT, Interval::new(8, 11), "call");
    markers.insert(DIAGNOSTIC, Interval::new(12, 15), "unknown name");

    // Insert before the call: the call and its argument move.
    edit(&mut text, &mut markers, 8, 8, "self.");
    assert_eq!(text, "let x = self.foo(bar);");
    assert_eq!(markers.find_largest(HIGHLIGHT, 0), Some(&"keyword"));
    assert_eq!(markers.find_largest(HIGHLIGHT, 13), Some(&"call"));
    assert_eq!(markers.find_largest(DIAGNOSTIC, 17), Some(&"unknown name"));

    // Rewriting the argument drops the diagnostic attached to it.
    edit(&mut text, &mut markers, 17, 20, "baz");
    assert_eq!(text, "let x = self.foo(baz);");
    assert_eq!(markers.len(), 2);

    for (id, interval, name) in markers.iter() {
        let low = interval.low as usize;
        let high = interval.high as usize;
        println!("{id} {name}: {:?}", &text[low..high]);
    }
}
