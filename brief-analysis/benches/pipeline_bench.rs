use brief_analysis::pipeline::AssessmentPipeline;
use brief_core::types::case::{CaseContext, Document, PracticeArea};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn criminal_case(documents: usize) -> CaseContext {
    let page = "Custody record enclosed. Interview transcript attached, solicitor present. \
                The suspect was cautioned and rights read. Charge sheet: charged with \
                robbery. CCTV footage and an identification parade were obtained, a DNA \
                match confirmed, and a forensic report served. Disclosure schedule of \
                unused material provided. Several witnesses corroborate the account.";
    let docs = (0..documents)
        .map(|i| Document::from_text(format!("{page} Page {i} of the served bundle.")))
        .collect();
    CaseContext::new(docs, PracticeArea::Criminal).with_metadata(json!({
        "charge": {"offence": "robbery"},
        "compliance": {
            "solicitor_present": true,
            "interview_recorded": false,
            "rights_given": true,
            "caution_given": true,
            "custody_log_complete": false,
            "detention_hours": 30
        },
        "disclosure_gaps": [
            {"item": "officer bodycam", "severity": "material", "days_overdue": 14}
        ]
    }))
}

fn bench_assess(c: &mut Criterion) {
    let pipeline = AssessmentPipeline::new();
    let mut group = c.benchmark_group("assess");
    for documents in [1usize, 10, 100] {
        let ctx = criminal_case(documents);
        group.bench_with_input(
            BenchmarkId::from_parameter(documents),
            &ctx,
            |b, ctx| b.iter(|| pipeline.assess(ctx, 0)),
        );
    }
    group.finish();
}

fn bench_assess_batch(c: &mut Criterion) {
    let pipeline = AssessmentPipeline::new();
    let cases: Vec<CaseContext> = (0..32).map(|_| criminal_case(4)).collect();
    c.bench_function("assess_batch_32", |b| {
        b.iter(|| pipeline.assess_batch(&cases, 0))
    });
}

criterion_group!(benches, bench_assess, bench_assess_batch);
criterion_main!(benches);
