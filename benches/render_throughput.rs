//! End-to-end render throughput benchmarks
//!
//! Measures a full render (locate, read, typical view passes, write) of a
//! member list page with a varying number of table rows.
//!
//! Run benchmarks: `cargo bench --bench render_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mixview::core::MixRenderingProvider;
use mixview::traits::InMemoryResourceProvider;
use mixview::{
    ActionRuntime, HtmlDocument, MixPage, MixSupporter, RenderError, RenderingConfig, StaticRequestContext,
    render_page,
};
use std::hint::black_box;
use std::sync::Arc;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"/><link rel="stylesheet" href="../css/common.css"/></head>
<body><header id="header"><a href="@{/}">Harbor</a></header><footer id="footer">footer</footer></body>
</html>"#;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><link rel="stylesheet" href="../../css/member.css"/></head>
<body>
<header id="header"/>
<table><tbody id="members"><tr><td>1</td><td>name</td><td><a href="@{/member/edit/}">edit</a></td></tr></tbody></table>
<footer id="footer"/>
</body>
</html>"#;

struct RowsPage {
    rows: Vec<(usize, String)>,
}

impl MixPage for RowsPage {
    fn render(&self, html: &mut HtmlDocument, supporter: &MixSupporter<'_>) -> Result<(), RenderError> {
        supporter.reflect_list_to_table(html.root_mut(), "members", &self.rows, |row, (id, name)| {
            row.write(id.to_string()).write(name.as_str());
            Ok(())
        })
    }
}

fn provider() -> MixRenderingProvider {
    let resources = InMemoryResourceProvider::new()
        .with_text("WEB-INF/view/common/layout.html", LAYOUT)
        .and_then(|p| p.with_text("WEB-INF/view/member/list.html", PAGE))
        .expect("bench resources");
    MixRenderingProvider::new(Some(Arc::new(resources)), None, RenderingConfig::new())
}

fn bench_row_counts(c: &mut Criterion) {
    let provider = provider();
    let request = StaticRequestContext::new("/harbor");
    let runtime = ActionRuntime::new("MemberListAction", "index");

    let mut group = c.benchmark_group("row_count");
    for count in [1usize, 10, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let page = RowsPage {
                    rows: (0..count).map(|i| (i, format!("Member {i}"))).collect(),
                };
                let html = render_page(&provider, &request, &runtime, "/member/list.html", page)
                    .expect("render");
                black_box(html)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_row_counts);
criterion_main!(benches);
