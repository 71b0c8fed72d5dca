// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of a click-driven selector menu.
//!
//! A two-option language picker: open on click, commit `fr`, and observe
//! the exactly-once selection plus the close and focus-return events.
//! Run with `cargo run -p trellis_demos --example language_selector`.

use kurbo::{Rect, Size};
use trellis_menu::controller::MenuController;
use trellis_menu::events::MenuEvent;
use trellis_tree::{ItemIndex, MenuItem};

fn log(stage: &str, events: &[MenuEvent<&'static str>]) {
    for event in events {
        println!("{stage:>22}  {event:?}");
    }
}

fn main() {
    let items = vec![
        MenuItem::leaf("eng", "English"),
        MenuItem::leaf("fr", "French"),
    ];
    let index = ItemIndex::new(&items);

    let mut picker = MenuController::with_selected("eng");
    picker.set_trigger_region(Rect::new(1100.0, 8.0, 1180.0, 36.0));

    log("click trigger", &picker.activate(&index));
    let placement = picker.placement(
        Size::new(140.0, 72.0),
        Rect::new(0.0, 0.0, 1280.0, 720.0),
        8.0,
    );
    println!("{:>22}  content at {:?}", "placement", placement.rect);

    log("hover French", &picker.hover(&index, "fr"));
    log("select French", &picker.select(&index, "fr"));
    println!(
        "{:>22}  selected = {:?}, open = {}",
        "done",
        picker.selected(),
        picker.is_open()
    );
}
