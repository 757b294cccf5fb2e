//! Collection behaviour against a loaded page, under both modern and legacy
//! capability sets.

use dom::{DomService, DomServiceConfig, NodeId, RuntimeFeatures};
use serde_json::{json, Value};
use traverse::{predicates, Document, Query};

fn element(name: &str, attrs: &[&str], children: Vec<Value>) -> Value {
    json!({
        "nodeType": 1,
        "nodeName": name,
        "attributes": attrs,
        "children": children,
    })
}

fn text(value: &str) -> Value {
    json!({ "nodeType": 3, "nodeName": "#text", "nodeValue": value })
}

/// ```text
/// <html><body>
///   <div id="list">
///     \n
///     <div class="item" id="i0">Zero<span class="tag">a</span></div>
///     <!-- gap -->
///     <div class="item" id="i1">One</div>
///     <div class="item active" id="i2">Two<span class="tag">b</span></div>
///     <div class="item" id="i3" style="color: blue">Three</div>
///   </div>
///   <p id="code">print<script>var x</script></p>
/// </body></html>
/// ```
fn page() -> Value {
    let mut i0 = element(
        "DIV",
        &["class", "item", "id", "i0"],
        vec![
            text("Zero"),
            element("SPAN", &["class", "tag"], vec![text("a")]),
        ],
    );
    i0["computedStyles"] = json!({ "display": "block" });

    let list = element(
        "DIV",
        &["id", "list"],
        vec![
            text("\n"),
            i0,
            json!({ "nodeType": 8, "nodeName": "#comment", "nodeValue": "gap" }),
            element("DIV", &["class", "item", "id", "i1"], vec![text("One")]),
            element(
                "DIV",
                &["class", "item active", "id", "i2"],
                vec![
                    text("Two"),
                    element("SPAN", &["class", "tag"], vec![text("b")]),
                ],
            ),
            element(
                "DIV",
                &["class", "item", "id", "i3", "style", "color: blue"],
                vec![text("Three")],
            ),
        ],
    );
    let code = element(
        "P",
        &["id", "code"],
        vec![
            text("print"),
            element("SCRIPT", &[], vec![text("var x")]),
        ],
    );

    json!({
        "root": {
            "nodeType": 9,
            "nodeName": "#document",
            "children": [
                element("HTML", &[], vec![element("BODY", &[], vec![list, code])])
            ]
        }
    })
}

fn load(features: RuntimeFeatures) -> Query {
    let mut service = DomService::with_config(DomServiceConfig {
        features,
        ..Default::default()
    });
    service.parse_cdp_dom_tree(&page()).unwrap();
    Query::new(Document::from(service))
}

fn both() -> Vec<Query> {
    vec![
        load(RuntimeFeatures::default()),
        load(RuntimeFeatures::legacy()),
    ]
}

fn id(query: &Query, value: &str) -> NodeId {
    query
        .document()
        .borrow()
        .find_by_id(value)
        .unwrap_or_else(|| panic!("no element #{}", value))
}

fn ids(query: &Query, values: &[&str]) -> Vec<NodeId> {
    values.iter().map(|v| id(query, v)).collect()
}

fn tags(query: &Query) -> Vec<NodeId> {
    query.document().borrow().find(|node| node.has_class("tag"))
}

#[test]
fn test_select_returns_query_order() {
    for query in both() {
        let items = query.select(".item").unwrap();
        assert_eq!(items.nodes(), ids(&query, &["i0", "i1", "i2", "i3"]).as_slice());

        let list = id(&query, "list");
        assert_eq!(query.select_in("span", list).unwrap().nodes(), tags(&query).as_slice());
        assert!(query.select_in(".item", id(&query, "code")).unwrap().is_empty());
    }
}

#[test]
fn test_find_flattens_in_order() {
    for query in both() {
        let found = query.select(".item").unwrap().find(".tag").unwrap();
        assert_eq!(found.nodes(), tags(&query).as_slice());

        let none = query.select("#i1").unwrap().find("span").unwrap();
        assert!(none.is_empty());
    }
}

#[test]
fn test_filter_by_selector_and_predicate() {
    for query in both() {
        let active = query.select(".item").unwrap().filter(".active").unwrap();
        assert_eq!(active.nodes(), &[id(&query, "i2")]);

        let listed = query.select(".item").unwrap().filter("#i3, #i1").unwrap();
        assert_eq!(listed.nodes(), ids(&query, &["i1", "i3"]).as_slice());

        let starts_with_t = query
            .select(".item")
            .unwrap()
            .filter_by(|el, _| el.text_content().starts_with('T'));
        assert_eq!(starts_with_t.nodes(), ids(&query, &["i2", "i3"]).as_slice());

        let by_index = query.select(".item").unwrap().filter_by(|_, index| index > 2);
        assert_eq!(by_index.nodes(), &[id(&query, "i3")]);
    }
}

#[test]
fn test_even_odd_use_sibling_position() {
    for query in both() {
        let even = query.select(".item").unwrap().filter_by(predicates::even);
        assert_eq!(even.nodes(), ids(&query, &["i0", "i2"]).as_slice());

        let odd = query.select(".item").unwrap().filter_by(predicates::odd);
        assert_eq!(odd.nodes(), ids(&query, &["i1", "i3"]).as_slice());

        // Without #i0 the collection index and the DOM position disagree
        let rest = || query.select(".item:not(#i0)").unwrap();
        assert_eq!(
            rest().filter_by(predicates::simple_even).nodes(),
            ids(&query, &["i1", "i3"]).as_slice()
        );
        assert_eq!(
            rest().filter_by(predicates::simple_odd).nodes(),
            &[id(&query, "i2")]
        );
        assert_eq!(
            rest().filter_by(predicates::even).nodes(),
            &[id(&query, "i2")]
        );
    }
}

#[test]
fn test_siblings_exclude_self_and_dedupe() {
    for query in both() {
        let i1 = id(&query, "i1");
        let siblings = query.wrap(i1).siblings();
        assert!(!siblings.contains(&i1));
        assert_eq!(siblings.nodes(), ids(&query, &["i0", "i2", "i3"]).as_slice());

        let pair = query.select("#i1, #i2").unwrap().siblings();
        assert_eq!(pair.nodes(), ids(&query, &["i0", "i2", "i3", "i1"]).as_slice());

        let root = query.select("html").unwrap().siblings();
        assert!(root.is_empty());
    }
}

#[test]
fn test_next_and_prev_skip_non_elements() {
    for query in both() {
        let i0 = id(&query, "i0");
        let next = query.wrap(i0).next();
        assert_eq!(next.nodes(), &[id(&query, "i1")]);
        assert_eq!(next.prev().nodes(), &[i0]);

        assert!(query.select("#i0").unwrap().prev().is_empty());
        assert!(query.select("#i3").unwrap().next().is_empty());

        let shifted = query.select(".item").unwrap().next();
        assert_eq!(shifted.nodes(), ids(&query, &["i1", "i2", "i3"]).as_slice());
    }
}

#[test]
fn test_next_all_and_prev_all_walk_the_chain() {
    for query in both() {
        let following = query.select("#i0").unwrap().next_all();
        assert_eq!(following.nodes(), ids(&query, &["i1", "i2", "i3"]).as_slice());

        let preceding = query.select("#i3").unwrap().prev_all();
        assert_eq!(preceding.nodes(), ids(&query, &["i2", "i1", "i0"]).as_slice());

        // Results are concatenated per element, overlap included
        let overlapping = query.select("#i1, #i2").unwrap().next_all();
        assert_eq!(overlapping.nodes(), ids(&query, &["i2", "i3", "i3"]).as_slice());

        assert!(query.select("#i3").unwrap().next_all().is_empty());
    }
}

#[test]
fn test_closest_walks_ancestors_only() {
    for query in both() {
        let tag = tags(&query)[1];
        let item = query.wrap(tag).closest(".item").unwrap();
        assert_eq!(item.nodes(), &[id(&query, "i2")]);

        let body = query.wrap(tag).closest("body").unwrap();
        assert_eq!(body.nodes(), query.select("body").unwrap().nodes());

        assert!(query.wrap(tag).closest("table").unwrap().is_empty());
        assert!(query.wrap(tag).closest(".tag").unwrap().is_empty());
    }
}

#[test]
fn test_is_requires_every_element() {
    for query in both() {
        let items = query.select(".item").unwrap();
        assert!(items.is("div").unwrap());
        assert!(items.is("#list > .item").unwrap());
        assert!(!items.is(".active").unwrap());
        assert!(query.select("#i2").unwrap().is(".active").unwrap());
        assert!(!query.select("html").unwrap().is("body").unwrap());
    }
}

#[test]
fn test_text_read_and_write() {
    for query in both() {
        let pair = query.select("#i1, #i3").unwrap();
        assert_eq!(pair.text().unwrap(), vec!["One", "Three"]);

        let pair = pair.set_text("x").unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair.text().unwrap(), vec!["x", "x"]);

        let all = query.select(".item").unwrap().text().unwrap();
        assert_eq!(all, vec!["Zeroa", "x", "Twob", "x"]);
    }
}

#[test]
fn test_repeated_set_text_keeps_arena_size() {
    for query in both() {
        let before = query.document().borrow().len();
        let mut items = query.select(".item").unwrap();
        for _ in 0..1000 {
            items = items.set_text("x").unwrap();
        }
        assert_eq!(query.document().borrow().len(), before);
        assert_eq!(items.text().unwrap(), vec!["x"; 4]);
    }
}

#[test]
fn test_text_property_detection() {
    let modern = load(RuntimeFeatures::default());
    assert_eq!(modern.select("#code").unwrap().text().unwrap(), vec!["printvar x"]);

    let legacy = load(RuntimeFeatures::legacy());
    assert_eq!(legacy.select("#code").unwrap().text().unwrap(), vec!["print"]);
}

#[test]
fn test_css_roundtrip() {
    for query in both() {
        let items = query.select(".item").unwrap().set_css([("color", "red")]).unwrap();
        assert_eq!(items.css("color").unwrap().as_deref(), Some("red"));

        let styles: Vec<Option<String>> = {
            let arena = query.document().borrow();
            items
                .iter()
                .map(|&id| arena.attr(id, "style").unwrap().map(String::from))
                .collect()
        };
        assert!(styles.iter().all(|s| s.as_deref() == Some("color:red")));
    }
}

#[test]
fn test_css_merges_into_existing_style() {
    for query in both() {
        let i3 = query
            .select("#i3")
            .unwrap()
            .set_css([("margin-left", "2em"), ("color", "green")])
            .unwrap();

        let style = query
            .document()
            .borrow()
            .attr(id(&query, "i3"), "style")
            .unwrap()
            .map(String::from);
        assert_eq!(style.as_deref(), Some("color:green;margin-left:2em"));
        assert_eq!(i3.css("color").unwrap().as_deref(), Some("green"));
    }
}

#[test]
fn test_css_read_strategies() {
    let modern = load(RuntimeFeatures::default());
    let item = modern
        .select("#i1")
        .unwrap()
        .set_css([("margin-left", "2em")])
        .unwrap();
    assert_eq!(item.css("marginLeft").unwrap().as_deref(), Some("2em"));
    assert_eq!(item.css("margin-left").unwrap().as_deref(), Some("2em"));

    let legacy = load(RuntimeFeatures::legacy());
    let item = legacy
        .select("#i1")
        .unwrap()
        .set_css([("margin-left", "2em")])
        .unwrap();
    assert_eq!(item.css("marginLeft").unwrap().as_deref(), Some("32px"));
    let style = legacy
        .document()
        .borrow()
        .attr(id(&legacy, "i1"), "style")
        .unwrap()
        .map(String::from);
    assert_eq!(style.as_deref(), Some("margin-left:2em"));
}

#[test]
fn test_css_reads_first_element_only() {
    for query in both() {
        let items = query.select(".item").unwrap();
        assert_eq!(items.css("display").unwrap().as_deref(), Some("block"));
        assert_eq!(items.css("color").unwrap(), None);
    }
}

#[test]
fn test_invalid_selectors_are_reported() {
    let query = load(RuntimeFeatures::default());
    assert!(query.select("..item").is_err());
    assert!(query.select(".item").unwrap().find("[").is_err());
    assert!(query.select(".item").unwrap().filter(":hover").is_err());
    assert!(query.select(".item").unwrap().is("a >").is_err());
    assert!(query.select(".item").unwrap().closest("").is_err());
}

#[test]
fn test_chaining() {
    for query in both() {
        let texts = query
            .select("#list")
            .unwrap()
            .find(".item")
            .unwrap()
            .filter_by(predicates::even)
            .next()
            .text()
            .unwrap();
        assert_eq!(texts, vec!["One", "Three"]);

        let shared = query.select("#i0").unwrap();
        let updated = query.select("#i0").unwrap().set_text("changed").unwrap();
        assert!(shared.document().ptr_eq(updated.document()));
        assert_eq!(shared.text().unwrap(), vec!["changed"]);
    }
}
