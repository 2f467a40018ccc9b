use anyhow::Result;
use colored::Colorize;
use pagetree::{NodeKind, RouteNode};

use crate::ProjectArgs;

pub fn execute(project: &ProjectArgs) -> Result<()> {
    let config = super::load_config(project)?;
    let tree = super::build_tree(&project.root, &config)?;

    print!("{}", render(tree.root(), true));
    println!();
    println!("{} nodes", tree.node_count().to_string().bold());
    Ok(())
}

/// Renders a node and its descendants with box-drawing guides
pub fn render(root: &RouteNode, paint: bool) -> String {
    let mut out = String::new();
    out.push_str(&describe(root, paint));
    out.push('\n');
    render_children(root, "", paint, &mut out);
    out
}

fn render_children(node: &RouteNode, prefix: &str, paint: bool, out: &mut String) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, guide) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };

        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&describe(child, paint));
        out.push('\n');
        render_children(child, &format!("{}{}", prefix, guide), paint, out);
    }
}

/// `slot [kind] module (error: module)`
fn describe(node: &RouteNode, paint: bool) -> String {
    let slot = node.slot.to_string();
    let kind = format!("[{}]", node.kind());
    let module = node
        .content
        .as_ref()
        .map(|content| content.module().source().to_string());
    let error = node
        .error_element
        .as_ref()
        .map(|element| format!("(error: {})", element.module));

    let (slot, kind) = if paint {
        let kind = match node.kind() {
            NodeKind::Layout => kind.magenta(),
            NodeKind::Page | NodeKind::Index | NodeKind::CatchAll => kind.green(),
            NodeKind::NotFound => kind.yellow(),
            NodeKind::Pathless => kind.dimmed(),
        };
        (slot.bold().to_string(), kind.to_string())
    } else {
        (slot, kind)
    };

    let mut line = format!("{} {}", slot, kind);
    if let Some(module) = module {
        line.push(' ');
        line.push_str(&module);
    }
    if let Some(error) = error {
        line.push(' ');
        if paint {
            line.push_str(&error.red().to_string());
        } else {
            line.push_str(&error);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetree::{ModuleRef, RouteSources, RouteTree, RoutingConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_plain() {
        let sources = RouteSources::from_modules([
            ModuleRef::external("./pages/layout.tsx"),
            ModuleRef::external("./pages/page.tsx"),
            ModuleRef::external("./pages/error.tsx"),
            ModuleRef::external("./pages/(auth)/login/page.tsx"),
            ModuleRef::external("./pages/about/page.tsx"),
            ModuleRef::external("./pages/404.tsx"),
        ]);
        let tree = RouteTree::build(&sources, &RoutingConfig::default()).unwrap();

        let expected = "\
/ [layout] ./pages/layout.tsx (error: ./pages/error.tsx)
├── (index) [index] ./pages/page.tsx
├── about [page] ./pages/about/page.tsx
├── (auth) [pathless]
│   └── login [page] ./pages/(auth)/login/page.tsx
└── * [not-found] ./pages/404.tsx
";
        assert_eq!(render(tree.root(), false), expected);
    }
}
