// Host-side tests for the page hide/show decisions.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::*;

#[test]
fn cached_page_is_suspended_not_disposed() {
    assert_eq!(on_page_hide(true), PageTransition::Suspend);
    assert_eq!(on_page_show(true), PageTransition::Resume);
}

#[test]
fn unloading_page_disposes() {
    assert_eq!(on_page_hide(false), PageTransition::Dispose);
}

#[test]
fn first_show_leaves_loop_alone() {
    assert_eq!(on_page_show(false), PageTransition::Ignore);
}
