// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ink hit testing.
//!
//! Draw two strokes, watch change notifications, and probe a few points.
//! The hit index is shared with a second thread, the way a renderer would use it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p folio_demos --example ink_hit`

use std::thread;

use folio_annotation::{AnnotationError, InkAnnotation, InkOperator, StrokeWidth};
use kurbo::Point;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), AnnotationError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut ink = InkAnnotation::new(0);
    let _ = ink.observers_mut().connect(|changed| info!(?changed, "ink changed"));
    let _ = ink.set_name(Some("ink-0001"));
    let _ = ink.set_operator(InkOperator::Multiply);
    let _ = ink.set_ink(
        vec![
            vec![Point::new(100.0, 100.0), Point::new(180.0, 140.0), Point::new(260.0, 100.0)],
            vec![Point::new(120.0, 200.0), Point::new(240.0, 200.0)],
        ],
        StrokeWidth::PerPath(vec![4.0, 12.0]),
    )?;

    for p in [
        Point::new(140.0, 120.0),
        Point::new(140.0, 125.0),
        Point::new(200.0, 205.0),
        Point::new(200.0, 215.0),
    ] {
        println!("({}, {}): {:?}", p.x, p.y, ink.hit_segment(p));
    }

    if let Some(index) = ink.hit_index() {
        let renderer = thread::spawn(move || index.get(180.0, 140.0).ok().flatten().copied());
        println!("renderer sees: {:?}", renderer.join().ok().flatten());
    }

    // Widths must match the paths one for one.
    match ink.set_widths(vec![1.0]) {
        Err(e) => println!("rejected: {e}"),
        Ok(_) => unreachable!("one width for two paths"),
    }
    Ok(())
}
