// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of a hover-driven top navigation.
//!
//! Simulates a pointer traversing a four-level menu tree with explicit
//! timestamps, printing every event the engine emits: hover-intent opens,
//! a sibling swap with no flicker, keyboard traversal, and a final
//! Escape. Run with `cargo run -p trellis_demos --example top_nav`.

use kurbo::{Rect, Size};
use trellis_keynav::NavIntent;
use trellis_menu::coordinator::HoverCoordinator;
use trellis_menu::events::MenuEvent;
use trellis_tree::{ItemIndex, MenuItem};

fn log(stage: &str, events: &[MenuEvent<u32>]) {
    for event in events {
        println!("{stage:>28}  {event:?}");
    }
}

fn main() {
    let items = vec![
        MenuItem::branch(
            1,
            "Products",
            vec![
                MenuItem::branch(
                    10,
                    "Hardware",
                    vec![
                        MenuItem::branch(
                            100,
                            "Laptops",
                            vec![
                                MenuItem::leaf(1000, "Gaming"),
                                MenuItem::leaf(1001, "Ultrabook"),
                            ],
                        ),
                        MenuItem::leaf(101, "Phones"),
                    ],
                ),
                MenuItem::leaf(11, "Software"),
            ],
        ),
        MenuItem::branch(
            2,
            "Company",
            vec![MenuItem::leaf(20, "About"), MenuItem::leaf(21, "Careers")],
        ),
        MenuItem::leaf(3, "Pricing"),
    ];
    let index = ItemIndex::new(&items);

    let mut nav: HoverCoordinator<u32> = HoverCoordinator::new();
    log(
        "viewport",
        &nav.set_viewport(&index, Rect::new(0.0, 0.0, 1280.0, 720.0)),
    );
    nav.set_trigger_region(1, Rect::new(0.0, 0.0, 96.0, 32.0));
    nav.set_trigger_region(2, Rect::new(96.0, 0.0, 192.0, 32.0));
    nav.set_content_size(&index, 1, Size::new(200.0, 120.0));
    nav.set_content_size(&index, 2, Size::new(200.0, 80.0));

    // Hover "Products"; the submenu opens after the 150 ms open intent.
    log("enter Products", &nav.pointer_enter_trigger(&index, 1, 0));
    log("t=150", &nav.advance(&index, 150));

    // Travel down into the submenu and hover "Hardware".
    log("enter content", &nav.pointer_enter_content(&index, 1, 180));
    log("enter Hardware", &nav.pointer_enter_trigger(&index, 10, 220));
    log("t=370", &nav.advance(&index, 370));

    // Swap straight onto the sibling "Company" before the close intent
    // elapses: one close, one open, never a fully closed frame.
    log("swap to Company", &nav.pointer_enter_trigger(&index, 2, 400));
    log("t=550", &nav.advance(&index, 550));
    println!("{:>28}  open path = {:?}", "after swap", nav.open_path());

    // Keyboard from here: rove within the open depth, then dismiss.
    log("ArrowDown", &nav.key(&index, NavIntent::Next, 600));
    log("Escape", &nav.key(&index, NavIntent::Dismiss, 650));
    println!("{:>28}  open = {}", "after escape", nav.is_open());
}
