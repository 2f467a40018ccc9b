//! The merged tree must not depend on the order the bundler lists files in

use pagetree::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const PAGES: [&str; 7] = [
    "./pages/layout.tsx",
    "./pages/page.tsx",
    "./pages/users/layout.tsx",
    "./pages/users/page.tsx",
    "./pages/users/[id]/settings/page.tsx",
    "./pages/(auth)/layout.tsx",
    "./pages/(auth)/login/page.tsx",
];

const MORE_PAGES: [&str; 12] = [
    "./pages/layout.tsx",
    "./pages/page.tsx",
    "./pages/about/page.tsx",
    "./pages/about/team/page.tsx",
    "./pages/about/team/layout.tsx",
    "./pages/users/[id]/page.tsx",
    "./pages/users/[id]/layout.tsx",
    "./pages/users/[id]/posts/[post]/page.tsx",
    "./pages/blog/[...slug]/page.tsx",
    "./pages/(shop)/page.tsx",
    "./pages/(shop)/cart/page.tsx",
    "./pages/_private/(index)/docs/page.tsx",
];

fn fold(files: &[&str]) -> RouteTree {
    let config = RoutingConfig::default();
    let modules: Vec<ModuleRef> = files.iter().map(|file| ModuleRef::external(*file)).collect();
    let loading = LoadingIndex::new(&[], &config);
    RouteTree::from_pages(&modules, &loading, &config).unwrap()
}

/// Every permutation of `items`, by recursive insertion
fn permutations<'a>(items: &[&'a str]) -> Vec<Vec<&'a str>> {
    match items.split_first() {
        None => vec![vec![]],
        Some((head, tail)) => permutations(tail)
            .into_iter()
            .flat_map(|perm| {
                (0..=perm.len()).map(move |pos| {
                    let mut next = perm.clone();
                    next.insert(pos, *head);
                    next
                })
            })
            .collect(),
    }
}

#[test]
fn test_permutation_helper() {
    assert_eq!(permutations(&["a", "b", "c"]).len(), 6);
}

#[test]
fn test_every_permutation_gives_same_tree() {
    let expected = fold(&PAGES);
    for order in permutations(&PAGES) {
        assert_eq!(fold(&order), expected, "order: {:?}", order);
    }
}

#[test]
fn test_reference_tree_shape() {
    let tree = fold(&PAGES);
    let labels: Vec<String> = tree.root().children().iter().map(|c| c.slot.to_string()).collect();
    assert_eq!(labels, vec!["(index)", "users", "(auth)", "users/:id"]);

    let users = tree.find(&["users"]).unwrap();
    assert_eq!(users.kind(), NodeKind::Layout);
    assert_eq!(users.children()[0].kind(), NodeKind::Index);

    let settings = tree.find(&["users/:id", "settings"]).unwrap();
    assert_eq!(settings.kind(), NodeKind::Page);
}

proptest! {
    #[test]
    fn shuffled_pages_give_same_tree(order in Just(MORE_PAGES.to_vec()).prop_shuffle()) {
        prop_assert_eq!(fold(&order), fold(&MORE_PAGES));
    }

    #[test]
    fn repeated_pages_are_idempotent(order in Just(MORE_PAGES.to_vec()).prop_shuffle(), split in 0..MORE_PAGES.len()) {
        let mut doubled = order.clone();
        doubled.extend_from_slice(&order[..split]);
        prop_assert_eq!(fold(&doubled), fold(&MORE_PAGES));
    }
}
