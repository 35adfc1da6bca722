//! Trellis Selection Demo
//!
//! Headless walkthrough of the tri-state checkbox:
//! - Inflating a widget from a TOML attribute snippet
//! - Driving a "select all" header from a list of item checkboxes
//! - Clicking through the three-state cycle
//! - Recording a paint pass into a display list
//! - Saving instance state and restoring it onto a recreated widget
//!
//! Run with: cargo run -p trellis --example selection_demo

use std::sync::Arc;

use trellis::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trellis=debug".into()),
        )
        .init();

    trellis_core::init_global_registry();

    // ------------------------------------------------------------------
    // Inflate the header checkbox from declarative attributes
    // ------------------------------------------------------------------
    let attrs = AttributeSet::from_toml_str(
        r#"
        text = "Select all files"
        state_multiple = true
        vertical_alignment = "center"
        icon = "theme:checkbox"
        "#,
    )?;
    let mut header = TriStateCheckBox::from_attributes(&attrs)?;
    header.widget_base_mut().set_geometry(Rect::new(0.0, 0.0, 240.0, 32.0));

    // Give the header distinct icons per state
    header.set_icon(Arc::new(
        StateIconSet::new(
            IconSource::Named("checkbox_unchecked".into()),
            Size::new(24.0, 24.0),
        )
        .with_variant(DrawableState::ALL, IconSource::Named("checkbox_all".into()))
        .with_variant(
            DrawableState::MULTIPLE,
            IconSource::Named("checkbox_multiple".into()),
        ),
    ));

    header.state_changed().connect(|state| {
        println!("header -> {:?}", state);
    });
    header.clicked().connect(|checked| {
        println!("header clicked, checked = {}", checked);
    });

    println!("inflated header: {:?} ({:?})", header.text(), header.state());

    // ------------------------------------------------------------------
    // Drive the header from a simulated item list
    // ------------------------------------------------------------------
    let items = ["report.pdf", "photo.png", "notes.txt"];
    let selected = [true, false, true];

    let count = selected.iter().filter(|s| **s).count();
    header.set_state_flags(count == items.len(), count > 0);
    println!(
        "{} of {} items selected, header shows {:?}",
        count,
        items.len(),
        header.state()
    );

    // ------------------------------------------------------------------
    // Click through the three-state cycle
    // ------------------------------------------------------------------
    // Partial -> click clears everything
    header.click();
    assert_eq!(header.state(), SelectionState::Unchecked);

    // Unchecked -> click selects everything
    header.click();
    assert_eq!(header.state(), SelectionState::All);

    // ------------------------------------------------------------------
    // Record a paint pass
    // ------------------------------------------------------------------
    let mut list = DisplayList::new();
    {
        let mut ctx = PaintContext::new(&mut list, header.rect());
        header.paint(&mut ctx);
    }
    println!("paint recorded {} commands:", list.len());
    for command in list.commands() {
        println!("  {:?}", command);
    }

    // ------------------------------------------------------------------
    // Save, destroy, recreate, restore
    // ------------------------------------------------------------------
    let snapshot = header.save_instance_state()?;
    drop(header);

    let mut recreated = TriStateCheckBox::new("placeholder");
    recreated.state_changed().connect(|state| {
        println!("recreated header observed restore -> {:?}", state);
    });
    recreated.restore_instance_state(&snapshot)?;

    println!(
        "recreated header: {:?} ({:?})",
        recreated.text(),
        recreated.state()
    );
    assert_eq!(recreated.state(), SelectionState::All);
    assert_eq!(recreated.text(), "Select all files");

    Ok(())
}
