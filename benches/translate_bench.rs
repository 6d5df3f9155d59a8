use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use odata_dsl::models::{OrderItem, ParsedQuery};
use odata_dsl::query::ParseNode;
use odata_dsl::{FilterTranslator, QueryAssembler, TranslatorConfig};

fn eq(field: &str, value: i64) -> ParseNode {
    ParseNode::binary("eq", ParseNode::field(field), ParseNode::literal(value))
}

/// `or` chain of `count` equality tests, nested to the right
fn wide_tree(count: usize) -> ParseNode {
    let mut node = eq("id", 0);
    for i in 1..count {
        node = ParseNode::binary("or", eq("id", i as i64), node);
    }
    node
}

/// Balanced `and` tree of the given depth
fn deep_tree(depth: usize) -> ParseNode {
    if depth <= 1 {
        return ParseNode::binary("contains", ParseNode::field("title"), ParseNode::literal("rust"));
    }
    ParseNode::binary("and", deep_tree(depth - 1), deep_tree(depth - 1))
}

fn bench_translate_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate_wide");
    for &count in &[8usize, 32, 60] {
        let tree = wide_tree(count);
        let translator = FilterTranslator::default();
        group.bench_with_input(BenchmarkId::from_parameter(count), &tree, |b, tree| {
            b.iter(|| translator.translate(black_box(tree)).unwrap());
        });
    }
    group.finish();
}

fn bench_translate_balanced(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate_balanced");
    for &depth in &[4usize, 8, 12] {
        let tree = deep_tree(depth);
        let translator = FilterTranslator::default();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &tree, |b, tree| {
            b.iter(|| translator.translate(black_box(tree)).unwrap());
        });
    }
    group.finish();
}

fn bench_build_query(c: &mut Criterion) {
    let assembler = QueryAssembler::new(TranslatorConfig::default().with_default_page_size(20));
    let parsed = ParsedQuery::new()
        .filter(ParseNode::binary(
            "and",
            ParseNode::binary("eq", ParseNode::field("status"), ParseNode::literal("open")),
            ParseNode::binary("gt", ParseNode::field("priority"), ParseNode::literal(3)),
        ))
        .top(10)
        .select(["id", "status", "priority"])
        .order_by(vec![OrderItem::new("priority", "desc")]);

    c.bench_function("build_query_and_serialize", |b| {
        b.iter(|| {
            let doc = assembler.build_query(black_box(&parsed)).unwrap();
            doc.to_json_string(false).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_translate_wide,
    bench_translate_balanced,
    bench_build_query
);
criterion_main!(benches);
