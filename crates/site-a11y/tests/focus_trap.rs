//! Focus trap properties over arbitrary dialogs.

use proptest::prelude::*;
use site_a11y::{FocusMove, FocusTarget, Key, KeyAction, KeyPress, Modal, Overlay, handle_key, trap_tab};

fn element() -> impl Strategy<Value = FocusTarget> {
    (
        prop::sample::select(vec!["button", "input", "a", "div", "p", "select"]),
        any::<bool>(),
        prop::option::of(-1i32..3),
    )
        .prop_map(|(tag, has_href, tabindex)| FocusTarget {
            tag: tag.to_string(),
            has_href,
            tabindex,
        })
}

proptest! {
    #[test]
    fn wrap_target_is_focusable_and_in_bounds(
        elements in prop::collection::vec(element(), 0..12),
        active in prop::option::of(0usize..12),
        shift in any::<bool>(),
    ) {
        if let FocusMove::Wrap { to } = trap_tab(&elements, active, shift) {
            prop_assert!(to < elements.len());
            prop_assert!(elements[to].is_focusable());
        }
    }

    #[test]
    fn tab_then_shift_tab_returns(
        elements in prop::collection::vec(element(), 1..12),
    ) {
        let focusable: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.is_focusable())
            .map(|(index, _)| index)
            .collect();
        prop_assume!(!focusable.is_empty());
        let first = focusable[0];
        let last = focusable[focusable.len() - 1];

        prop_assert_eq!(trap_tab(&elements, Some(last), false), FocusMove::Wrap { to: first });
        prop_assert_eq!(trap_tab(&elements, Some(first), true), FocusMove::Wrap { to: last });
    }
}

#[test]
fn modal_from_host_json() {
    let json = r#"{
        "id": "contact-modal",
        "elements": [
            {"tag": "button", "tabindex": null},
            {"tag": "input"},
            {"tag": "a", "has_href": true}
        ]
    }"#;
    let mut modal: Modal = serde_json::from_str(json).unwrap();
    assert!(!modal.is_shown());

    let tab = KeyPress::new(Key::from_dom("Tab"));
    assert_eq!(handle_key(&tab, Some(&mut modal), Some(2)), KeyAction::Ignored);

    modal.show();
    assert_eq!(
        handle_key(&tab, Some(&mut modal), Some(2)),
        KeyAction::Focus { index: 0 }
    );
    assert_eq!(
        handle_key(&KeyPress::new(Key::from_dom("Escape")), Some(&mut modal), None),
        KeyAction::Closed
    );
    assert!(!modal.is_shown());
}
