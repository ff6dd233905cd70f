//! Tests for the recipe graph: structural queries, expansion and table validation.
mod common;
use common::*;
use gousei::prelude::*;

/// Leaves obtained by substituting every crafted item with its recipe, recursively.
fn substituted_leaves(graph: &RecipeGraph, item: &str) -> Vec<String> {
    let components = graph.components_of(item).expect("item exists");
    if components.is_empty() {
        return vec![item.to_string()];
    }
    components
        .iter()
        .flat_map(|c| substituted_leaves(graph, c))
        .collect()
}

#[test]
fn test_items_keep_declaration_order() {
    let graph = create_small_graph();
    let items: Vec<&str> = graph.items().collect();
    assert_eq!(items.len(), 16);
    assert_eq!(items[0], "Tukohama's Touch");
    assert_eq!(items[1], "Solaris Touched");
    assert_eq!(items[15], "Overcharged");

    // Iteration restarts from the beginning on every call.
    let again: Vec<&str> = graph.items().collect();
    assert_eq!(items, again);
}

#[test]
fn test_recipes_with_components_skips_base_items() {
    let graph = create_small_graph();
    let recipes: Vec<(&str, &[String])> = graph.recipes_with_components().collect();
    let names: Vec<&str> = recipes.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        vec![
            "Tukohama's Touch",
            "Solaris Touched",
            "Executioner",
            "Magma Barrier",
            "Invulnerable",
            "Empowering Minions",
            "Necromancer",
        ]
    );
    for (item, recipe) in recipes {
        assert_eq!(graph.components_of(item).unwrap(), recipe);
        assert!(!recipe.is_empty());
    }
    assert_eq!(graph.base_items().count(), 9);
}

#[test]
fn test_components_of_returns_declared_recipe() {
    let graph = create_small_graph();
    assert_eq!(
        graph.components_of("Magma Barrier").unwrap(),
        ["Incendiary", "Bonebreaker"]
    );
    assert!(graph.components_of("Bonebreaker").unwrap().is_empty());
}

#[test]
fn test_unknown_item_is_an_error_for_every_query() {
    let graph = create_small_graph();
    assert!(matches!(
        graph.components_of("Mirror Image"),
        Err(GraphError::UnknownItem(name)) if name == "Mirror Image"
    ));
    assert!(matches!(
        graph.producers_of("Mirror Image"),
        Err(GraphError::UnknownItem(_))
    ));
    assert!(matches!(
        graph.expand("Mirror Image"),
        Err(GraphError::UnknownItem(_))
    ));
    assert!(!graph.contains("Mirror Image"));
}

#[test]
fn test_producers_of_lists_every_parent_in_order() {
    let graph = create_small_graph();
    assert_eq!(
        graph.producers_of("Bonebreaker").unwrap(),
        vec!["Tukohama's Touch", "Magma Barrier"]
    );
    assert_eq!(
        graph.producers_of("Juggernaut").unwrap(),
        vec!["Invulnerable", "Empowering Minions"]
    );
    assert_eq!(
        graph.producers_of("Executioner").unwrap(),
        vec!["Tukohama's Touch", "Empowering Minions"]
    );
    assert!(graph.producers_of("Solaris Touched").unwrap().is_empty());
}

#[test]
fn test_producers_and_components_agree_on_builtin_table() {
    let graph = RecipeGraph::new(RecipeTable::archnemesis().unwrap()).unwrap();
    for item in graph.items() {
        for component in graph.components_of(item).unwrap() {
            assert!(
                graph.producers_of(component).unwrap().contains(&item),
                "'{}' should list '{}' as a producer",
                component,
                item
            );
        }
        for producer in graph.producers_of(item).unwrap() {
            assert!(
                graph
                    .components_of(producer)
                    .unwrap()
                    .iter()
                    .any(|c| c == item)
            );
        }
    }
}

#[test]
fn test_expand_duplicates_shared_components() {
    let graph = create_small_graph();
    let tree = graph.expand("Tukohama's Touch").unwrap();

    assert_eq!(tree.item, "Tukohama's Touch");
    let children: Vec<&str> = tree.components.iter().map(|c| c.item.as_str()).collect();
    assert_eq!(children, vec!["Bonebreaker", "Executioner", "Magma Barrier"]);

    assert_eq!(
        tree.leaves(),
        vec![
            "Bonebreaker",
            "Frenzied",
            "Berserker",
            "Incendiary",
            "Bonebreaker"
        ]
    );
    assert_eq!(
        tree.leaf_counts(),
        vec![
            ("Bonebreaker", 2),
            ("Frenzied", 1),
            ("Berserker", 1),
            ("Incendiary", 1)
        ]
    );
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.node_count(), 8);
}

#[test]
fn test_expand_of_base_item_is_a_single_node() {
    let graph = create_small_graph();
    let tree = graph.expand("Sentinel").unwrap();
    assert!(tree.is_base());
    assert_eq!(tree.leaves(), vec!["Sentinel"]);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn test_expand_leaves_match_recursive_substitution() {
    let graph = RecipeGraph::new(RecipeTable::archnemesis().unwrap()).unwrap();
    for item in graph.items() {
        let tree = graph.expand(item).unwrap();
        let leaves: Vec<String> = tree.leaves().into_iter().map(str::to_string).collect();
        assert_eq!(leaves, substituted_leaves(&graph, item), "item '{}'", item);
        for leaf in tree.leaves() {
            assert!(graph.components_of(leaf).unwrap().is_empty());
        }
    }
}

#[test]
fn test_expand_detects_two_item_cycle() {
    let rows: &[(&str, &[&str])] = &[
        ("Storm Strider", &["Stormweaver", "Hasted"]),
        ("Stormweaver", &["Storm Strider"]),
        ("Hasted", &[]),
    ];
    let graph = RecipeGraph::new(rows).expect("cycles are accepted at construction");

    match graph.expand("Storm Strider") {
        Err(GraphError::GraphCycle { item, path }) => {
            assert_eq!(item, "Storm Strider");
            assert_eq!(path, vec!["Storm Strider", "Stormweaver", "Storm Strider"]);
        }
        other => panic!("Expected GraphCycle, got {:?}", other),
    }

    // Items that do not reach the cycle still expand.
    assert!(graph.expand("Hasted").is_ok());
}

#[test]
fn test_expand_detects_self_reference() {
    let rows: &[(&str, &[&str])] = &[("Echoist", &["Echoist"])];
    let graph = RecipeGraph::new(rows).unwrap();
    let err = graph.expand("Echoist").unwrap_err();
    assert!(matches!(err, GraphError::GraphCycle { ref path, .. } if path.len() == 2));
    assert!(err.to_string().contains("Echoist -> Echoist"));
}

#[test]
fn test_shared_component_is_not_mistaken_for_a_cycle() {
    // Diamond: both branches reach the same base item.
    let rows: &[(&str, &[&str])] = &[
        ("Top", &["Left", "Right"]),
        ("Left", &["Bottom"]),
        ("Right", &["Bottom"]),
        ("Bottom", &[]),
    ];
    let graph = RecipeGraph::new(rows).unwrap();
    let tree = graph.expand("Top").unwrap();
    assert_eq!(tree.leaf_counts(), vec![("Bottom", 2)]);
}

#[test]
fn test_construction_rejects_missing_component() {
    let rows: &[(&str, &[&str])] = &[
        ("Frost Strider", &["Frostweaver", "Hasted"]),
        ("Hasted", &[]),
    ];
    match RecipeGraph::new(rows) {
        Err(TableError::MissingComponent { component, parent }) => {
            assert_eq!(component, "Frostweaver");
            assert_eq!(parent, "Frost Strider");
        }
        other => panic!("Expected MissingComponent, got {:?}", other),
    }
}

#[test]
fn test_construction_rejects_duplicate_items() {
    let rows: &[(&str, &[&str])] = &[("Hasted", &[]), ("Hasted", &[])];
    assert!(matches!(
        RecipeGraph::new(rows),
        Err(TableError::DuplicateItem(name)) if name == "Hasted"
    ));
}

#[test]
fn test_repeated_component_counts_once_as_producer() {
    let rows: &[(&str, &[&str])] = &[("Twin", &["Hasted", "Hasted"]), ("Hasted", &[])];
    let graph = RecipeGraph::new(rows).unwrap();
    assert_eq!(graph.producers_of("Hasted").unwrap(), vec!["Twin"]);
    assert_eq!(graph.expand("Twin").unwrap().leaf_counts(), vec![("Hasted", 2)]);
}

#[test]
fn test_builtin_table_shape() {
    let graph = RecipeGraph::new(RecipeTable::archnemesis().unwrap()).unwrap();
    assert_eq!(graph.len(), 64);
    assert_eq!(graph.items().next(), Some("奇塔弗之触"));
    assert_eq!(graph.items().last(), Some("不需要"));
    assert_eq!(graph.recipes_with_components().count(), 36);
    assert_eq!(
        graph.components_of("奇塔弗之触").unwrap(),
        ["图克哈玛之触", "艾贝拉斯之触", "腐化", "灵枢炸弹"]
    );
}
