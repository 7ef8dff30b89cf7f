use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use xml_inspector::string_writer::Utf16String;
use xml_inspector::{Inspector, ParserConfig};

const KB: usize = 1024;

fn make_document(size: usize) -> String {
    let mut doc = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<catalog xmlns=\"urn:catalog\" xmlns:d=\"urn:details\">\n");
    let mut id = 0;
    while doc.len() < size {
        doc.push_str(&format!(
            "  <d:item id=\"{id}\" d:kind='plain'>\n    <name>Item &#35;{id} &amp; friends</name>\n    <!-- {id} -->\n    <data><![CDATA[raw <{id}>]]></data>\n    <empty/>\n  </d:item>\n"
        ));
        id += 1;
    }
    doc.push_str("</catalog>\n");
    doc
}

fn latin1_document(size: usize) -> Vec<u8> {
    make_document(size)
        .replacen("UTF-8", "ISO-8859-1", 1)
        .replace("friends", "fr\u{E9}res")
        .chars()
        .map(|c| c as u32 as u8)
        .collect()
}

fn count_nodes<S: xml_inspector::string_writer::StringWriter>(inspector: &mut Inspector<'_, S>) -> usize {
    let mut count = 0;
    while inspector.inspect() {
        count += inspector.attributes_count() + 1;
    }
    assert!(!inspector.has_error());
    count
}

fn inspect(c: &mut Criterion) {
    let mut group = c.benchmark_group("inspect");
    for size in [10 * KB, 100 * KB, 1000 * KB] {
        let doc = make_document(size);
        group.throughput(Throughput::Bytes(doc.len() as u64));

        group.bench_with_input(BenchmarkId::new("str", size), &doc, |b, doc| {
            let mut inspector = Inspector::new();
            b.iter(|| {
                inspector.reset_str(doc);
                black_box(count_nodes(&mut inspector))
            })
        });

        group.bench_with_input(BenchmarkId::new("bytes", size), &doc, |b, doc| {
            let mut inspector = Inspector::new();
            b.iter(|| {
                inspector.reset_bytes(doc.as_bytes());
                black_box(count_nodes(&mut inspector))
            })
        });

        let latin1 = latin1_document(size);
        group.bench_with_input(BenchmarkId::new("latin1", size), &latin1, |b, bytes| {
            let mut inspector = Inspector::new();
            b.iter(|| {
                inspector.reset_bytes(bytes);
                black_box(count_nodes(&mut inspector))
            })
        });

        group.bench_with_input(BenchmarkId::new("utf16_storage", size), &doc, |b, doc| {
            let mut inspector: Inspector<'_, Utf16String> = Inspector::configured(ParserConfig::new());
            b.iter(|| {
                inspector.reset_str(doc);
                black_box(count_nodes(&mut inspector))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, inspect);
criterion_main!(benches);
