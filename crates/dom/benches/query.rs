use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dom::{DomArena, SelectorList};

/// document > body > 200 x (div.row > span.cell * 5)
fn build_page() -> DomArena {
    let mut arena = DomArena::new();
    let doc = arena.create_document();
    arena.set_root(doc).unwrap();
    let body = arena.create_element("body");
    arena.append_child(doc, body).unwrap();

    for row in 0..200 {
        let div = arena.create_element("div");
        arena.set_attr(div, "class", "row").unwrap();
        arena.set_attr(div, "data-row", &row.to_string()).unwrap();
        arena.append_child(body, div).unwrap();
        for _ in 0..5 {
            let span = arena.create_element("span");
            arena.set_attr(span, "class", "cell").unwrap();
            arena.append_child(div, span).unwrap();
        }
    }
    arena
}

fn bench_queries(c: &mut Criterion) {
    let arena = build_page();
    let root = arena.root_id().unwrap();

    c.bench_function("select class", |b| {
        b.iter(|| arena.query_selector_all(root, black_box(".cell")).unwrap())
    });

    let complex = SelectorList::parse("body > div.row:nth-child(odd) span:last-child").unwrap();
    c.bench_function("select complex", |b| {
        b.iter(|| arena.select_all(root, black_box(&complex)).unwrap())
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
