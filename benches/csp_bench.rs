// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use csp_bypass::security::matcher;
use csp_bypass::{ContentSecurityPolicy, PolicyAnalyzer};

const POLICY: &str = "default-src 'self' https:; connect-src 'self' https: http:; \
    font-src 'self' https:; frame-src *; img-src 'self' https: http: data:; \
    media-src 'self' https:; object-src 'self' https:; \
    script-src 'self' https: 'unsafe-eval' 'unsafe-inline' http: *.googleapis.com cdnjs.cloudflare.com; \
    style-src 'self' https: 'unsafe-inline' http:; report-uri /tracking/csp;";

fn csp_parsing_benchmark(c: &mut Criterion) {
    c.bench_function("parse_csp", |b| {
        b.iter(|| {
            black_box(ContentSecurityPolicy::parse("Content-Security-Policy", black_box(POLICY)).ok())
        })
    });
}

fn domain_matching_benchmark(c: &mut Criterion) {
    let sources = ["*.googleapis.com", "ws://*.bar.com", "foobar.com", "https://cdn.example.net/x"];
    let labels = ["ajax", "googleapis", "com"];

    c.bench_function("match_domains", |b| {
        b.iter(|| {
            for source in &sources {
                black_box(matcher::matches(source, &labels));
            }
        })
    });
}

fn analysis_benchmark(c: &mut Criterion) {
    let analyzer = PolicyAnalyzer::new();
    let policy = match ContentSecurityPolicy::parse("Content-Security-Policy", POLICY) {
        Ok(policy) => policy,
        Err(e) => panic!("benchmark policy must parse: {}", e),
    };

    c.bench_function("analyze_policy", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&policy))))
    });
}

criterion_group!(benches, csp_parsing_benchmark, domain_matching_benchmark, analysis_benchmark);
criterion_main!(benches);
