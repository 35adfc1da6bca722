//! Logging and debugging facilities for Trellis.
//!
//! Trellis instruments itself with the `tracing` crate. Nothing is printed
//! unless the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Application code...
//! }
//! ```
//!
//! Log lines carry per-subsystem targets (see [`targets`]) so hosts can
//! filter with directives like `trellis_core::signal=trace`.
//!
//! [`ObjectTreeDebug`] renders the object hierarchy for inspection:
//!
//! ```ignore
//! use trellis_core::logging::ObjectTreeDebug;
//!
//! let debug = ObjectTreeDebug::new();
//! println!("{}", debug.format_all()?);
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::object::{ObjectId, ObjectResult, global_registry};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "trellis_core";
    /// Signal dispatch target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "trellis_core::object";
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output: names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing object trees.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the entire object tree starting from all root objects.
    pub fn format_all(&self) -> ObjectResult<String> {
        let registry = global_registry()?;
        let roots = registry.root_objects();

        let mut output = String::new();
        writeln!(output, "Object Tree ({} total objects):", registry.len())
            .expect("write to String");

        if roots.is_empty() {
            writeln!(output, "  (empty)").expect("write to String");
        } else {
            for root_id in roots {
                self.format_subtree_into(root_id, 0, true, &mut output)?;
            }
        }

        Ok(output)
    }

    /// Format a subtree starting from a specific object.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.format_subtree_into(root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ObjectResult<()> {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return Ok(());
        }

        let registry = global_registry()?;
        let name = registry.object_name(id)?;
        let type_name = registry.type_name(id)?;
        let children = registry.children(id)?;

        output.push_str(&self.build_prefix(depth, is_last));

        let display_name = if name.is_empty() { "(unnamed)" } else { &name };
        output.push_str(display_name);

        if self.options.show_ids {
            write!(output, " [{}]", id.as_raw()).expect("write to String");
        }

        if self.options.show_types {
            // Strip the module path for readability
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            write!(output, " ({})", short_type).expect("write to String");
        }

        output.push('\n');

        let child_count = children.len();
        for (i, child_id) in children.into_iter().enumerate() {
            let child_is_last = i == child_count - 1;
            self.format_subtree_into(child_id, depth + 1, child_is_last, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (pipe, tee, elbow) = match self.options.style {
            TreeStyle::Ascii => ("|  ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}  ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(pipe);
        }
        prefix.push_str(if is_last { elbow } else { tee });
        prefix
    }
}

impl fmt::Display for ObjectTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_all() {
            Ok(output) => write!(f, "{}", output),
            Err(e) => write!(f, "Error formatting object tree: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, ObjectBase, init_global_registry};

    struct TestWidget {
        base: ObjectBase,
    }

    impl TestWidget {
        fn new(name: &str) -> Self {
            let widget = Self {
                base: ObjectBase::new::<Self>(),
            };
            widget.base.set_name(name);
            widget
        }
    }

    impl Object for TestWidget {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_tree_format_header() {
        setup();
        let debug = ObjectTreeDebug::new();
        let output = debug.format_all().unwrap();
        assert!(output.contains("Object Tree"));
    }

    #[test]
    fn test_tree_format_single() {
        setup();
        let widget = TestWidget::new("root");

        let debug = ObjectTreeDebug::new();
        let output = debug.format_subtree(widget.object_id()).unwrap();

        assert!(output.contains("root"));
        assert!(output.contains("TestWidget"));
    }

    #[test]
    fn test_tree_format_hierarchy() {
        setup();
        let root = TestWidget::new("panel");
        let child1 = TestWidget::new("select_all");
        let child2 = TestWidget::new("items");

        child1.base.set_parent(Some(root.object_id())).unwrap();
        child2.base.set_parent(Some(root.object_id())).unwrap();

        let debug = ObjectTreeDebug::new();
        let output = debug.format_subtree(root.object_id()).unwrap();

        assert!(output.contains("panel"));
        assert!(output.contains("select_all"));
        assert!(output.contains("items"));
    }

    #[test]
    fn test_tree_format_minimal() {
        setup();
        let widget = TestWidget::new("plain");

        let debug = ObjectTreeDebug::with_options(TreeFormatOptions::minimal());
        let output = debug.format_subtree(widget.object_id()).unwrap();

        assert!(output.contains("plain"));
        assert!(!output.contains("TestWidget"));
        assert!(!output.contains("["));
    }

    #[test]
    fn test_tree_format_max_depth() {
        setup();
        let root = TestWidget::new("top");
        let child = TestWidget::new("mid");
        let grandchild = TestWidget::new("leaf");
        child.base.set_parent(Some(root.object_id())).unwrap();
        grandchild.base.set_parent(Some(child.object_id())).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..Default::default()
        };
        let debug = ObjectTreeDebug::with_options(options);
        let output = debug.format_subtree(root.object_id()).unwrap();

        assert!(output.contains("top"));
        assert!(output.contains("mid"));
        assert!(!output.contains("leaf"));
    }
}
