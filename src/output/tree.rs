//! Directory tree rendering
//!
//! Builds a nested structure from sorted relative paths and renders it with
//! box-drawing connectors under a root label.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct DirNode {
    children: BTreeMap<String, TreeNode>,
}

#[derive(Debug)]
enum TreeNode {
    Dir(DirNode),
    File,
}

impl DirNode {
    fn insert(&mut self, relative_path: &str) {
        let mut parts = relative_path.split('/').filter(|p| !p.is_empty()).peekable();
        let mut dir = self;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                dir.children.entry(part.to_string()).or_insert(TreeNode::File);
                return;
            }
            let node = dir
                .children
                .entry(part.to_string())
                .or_insert_with(|| TreeNode::Dir(DirNode::default()));
            dir = match node {
                TreeNode::Dir(child) => child,
                // A file and a directory cannot share a path; keep the first.
                TreeNode::File => return,
            };
        }
    }
}

/// Render `paths` as a tree under `root_name/`.
///
/// Entries are ordered by name at each level regardless of input order.
pub fn render_tree(root_name: &str, paths: &[String]) -> String {
    let mut root = DirNode::default();
    for path in paths {
        root.insert(path);
    }

    let mut output = String::new();
    output.push_str(root_name.trim_end_matches('/'));
    output.push_str("/\n");
    format_dir(&root, &mut output, "");
    output
}

fn format_dir(dir: &DirNode, output: &mut String, prefix: &str) {
    let count = dir.children.len();
    for (i, (name, node)) in dir.children.iter().enumerate() {
        let is_last = i == count - 1;
        let connector = if is_last { "└── " } else { "├── " };

        output.push_str(prefix);
        output.push_str(connector);
        output.push_str(name);

        match node {
            TreeNode::File => output.push('\n'),
            TreeNode::Dir(child) => {
                output.push_str("/\n");
                let new_prefix = if is_last {
                    format!("{}    ", prefix)
                } else {
                    format!("{}│   ", prefix)
                };
                format_dir(child, output, &new_prefix);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_nested_tree() {
        let tree = render_tree(
            "project",
            &paths(&["README.md", "src/lib.rs", "src/scan/mod.rs", "tests/it.rs"]),
        );
        let expected = "\
project/
├── README.md
├── src/
│   ├── lib.rs
│   └── scan/
│       └── mod.rs
└── tests/
    └── it.rs
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_tree("empty", &[]), "empty/\n");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = render_tree("r", &paths(&["b/x.go", "a.go"]));
        let b = render_tree("r", &paths(&["a.go", "b/x.go"]));
        assert_eq!(a, b);
    }
}
