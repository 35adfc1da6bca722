//! The paint surface widgets draw through.
//!
//! Widgets never talk to a renderer directly; they issue calls against the
//! [`Painter`] trait and the host decides what backs it. The built-in
//! [`DisplayList`] implementation records every call as a [`DrawCommand`],
//! which is what tests and headless hosts inspect.

use crate::icon::IconSource;
use crate::types::{Color, Point, Rect};

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color.
    FillRect { rect: Rect, color: Color },
    /// Stroke the outline of a rectangle.
    StrokeRect { rect: Rect, color: Color, width: f32 },
    /// Draw an icon into a rectangle.
    ///
    /// The rectangle is the icon's intrinsic size placed by the widget;
    /// hosts composite the referenced asset without scaling.
    Icon { source: IconSource, rect: Rect },
    /// Draw a run of text anchored at a baseline origin.
    Text {
        text: String,
        origin: Point,
        color: Color,
    },
}

/// Drawing operations available to widgets.
pub trait Painter {
    /// Fill a rectangle with a color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a border around a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw an icon into a rectangle.
    fn draw_icon(&mut self, source: &IconSource, rect: Rect);

    /// Draw text at an origin.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// A [`Painter`] that records commands instead of rasterizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// The icon commands, in draw order.
    pub fn icons(&self) -> impl Iterator<Item = (&IconSource, Rect)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Icon { source, rect } => Some((source, *rect)),
            _ => None,
        })
    }
}

impl Painter for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_icon(&mut self, source: &IconSource, rect: Rect) {
        self.commands.push(DrawCommand::Icon {
            source: source.clone(),
            rect,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_draw_order() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.draw_text("hi", Point::new(2.0, 8.0), Color::BLACK);

        assert_eq!(list.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::FillRect { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Text { .. }));
    }

    #[test]
    fn test_icon_filter() {
        let mut list = DisplayList::new();
        let source = IconSource::Named("save".into());
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.draw_icon(&source, Rect::new(1.0, 1.0, 8.0, 8.0));

        let icons: Vec<_> = list.icons().collect();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].0, &source);
        assert_eq!(icons[0].1, Rect::new(1.0, 1.0, 8.0, 8.0));
    }

    #[test]
    fn test_clear() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        assert!(!list.is_empty());
        list.clear();
        assert!(list.is_empty());
    }
}
