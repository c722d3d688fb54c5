use super::*;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::string::String;
use std::{format, vec};

/// Text built mostly from characters that mean something to one of the
/// scanners.
fn markup() -> impl Strategy<Value = String> {
    let alphabet = vec![
        'a', 'b', '-', ':', '_', '#', '.', '=', '"', '\'', '<', '`', ' ', '\t', '\n', '\r', '{',
        '}', '[', ']', '\\', 'é',
    ];
    proptest::collection::vec(proptest::sample::select(alphabet), 0..32)
        .prop_map(|chars| chars.into_iter().collect())
}

fn check_run(input: &str, result: Result<usize, Rejected>, log: &EventLog<TokenType>) {
    assert!(is_balanced(log.events()), "{input:?}");
    match result {
        // Exactly the construct is consumed when it matches...
        Ok(len) => assert_eq!(log.text(), &input[..len], "{input:?}"),
        // ...and everything before the mismatch when it doesn't.
        Err(err) => assert_eq!(log.text(), &input[..err.offset], "{input:?}"),
    }
}

proptest! {
    #[test]
    fn attribute_list_round_trip(body in markup(), single_line in any::<bool>()) {
        let eol = if single_line { EolPolicy::Disallow } else { EolPolicy::Allow };
        let input = format!("{{{body}");
        let (result, log) = scan_attributes(&input, eol);
        check_run(&input, result, &log);
    }

    #[test]
    fn label_round_trip(body in markup(), single_line in any::<bool>()) {
        let eol = if single_line { EolPolicy::Disallow } else { EolPolicy::Allow };
        let input = format!("[{body}");
        let (result, log, chunks) = scan_label(&input, eol);
        check_run(&input, result, &log);
        for pair in chunks.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn rescan_is_identical(body in markup()) {
        let input = format!("{{{body}");
        let (first, first_log) = scan_attributes(&input, EolPolicy::Allow);
        let (second, second_log) = scan_attributes(&input, EolPolicy::Allow);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_log, second_log);

        let input = format!("[{body}");
        let (first, first_log, first_chunks) = scan_label(&input, EolPolicy::Allow);
        let (second, second_log, second_chunks) = scan_label(&input, EolPolicy::Allow);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_log, second_log);
        prop_assert_eq!(first_chunks, second_chunks);
    }

    #[test]
    fn single_line_never_consumes_line_endings(body in markup()) {
        let input = format!("{{{body}");
        let (_, log) = scan_attributes(&input, EolPolicy::Disallow);
        prop_assert!(!log.text().contains('\n'));
        let input = format!("[{body}");
        let (_, log, chunks) = scan_label(&input, EolPolicy::Disallow);
        prop_assert!(!log.text().contains('\n'));
        prop_assert!(chunks.len() <= 1);
    }
}
