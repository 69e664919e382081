//! Performance benchmarks for codeecho

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use codeecho::test_utils::TestRepo;
use codeecho::{
    Classifier, Language, OutputFormat, OutputOptions, ScanConfig, Scanner, SniffThresholds,
    Transformer, create_writer,
};
use std::io;

const GO_SOURCE: &str = r#"// Package main provides the entry point for the application.
// This is additional documentation.
package main

import "fmt"

/* Config holds
   runtime settings. */
type Config struct {
    Name    string
    Verbose bool
}

func main() {


    fmt.Println("Hello, world!")   // greet
}
"#;

const PYTHON_SCRIPT: &str = r#"#!/usr/bin/env python3
import os

def main():
    print(os.getcwd())
"#;

fn bench_classifier(c: &mut Criterion) {
    let classifier = Classifier::new(SniffThresholds::default());
    let text = GO_SOURCE.repeat(64);
    let mut binary = text.as_bytes().to_vec();
    binary[4000] = 0;

    c.bench_function("is_text_content_text", |b| {
        b.iter(|| classifier.is_text_content(black_box(text.as_bytes())))
    });

    c.bench_function("is_text_content_binary", |b| {
        b.iter(|| classifier.is_text_content(black_box(&binary)))
    });

    c.bench_function("language_from_content", |b| {
        b.iter(|| classifier.language_from_content(black_box(PYTHON_SCRIPT.as_bytes())))
    });
}

fn bench_transformer(c: &mut Criterion) {
    let config = ScanConfig::default()
        .with_remove_comments(true)
        .with_remove_empty_lines(true)
        .with_compress_whitespace(true);
    let transformer = Transformer::from_config(&config);
    let source = GO_SOURCE.repeat(32);

    c.bench_function("transform_go_all", |b| {
        b.iter(|| transformer.apply(black_box(&source), Some(Language::Go)))
    });
}

fn bench_streaming_scan(c: &mut Criterion) {
    let repo = TestRepo::sample();
    for i in 0..50 {
        repo.add_file(&format!("pkg/mod{i}/lib.go"), GO_SOURCE);
    }
    let config = ScanConfig::default();

    let mut group = c.benchmark_group("streaming_scan");
    for format in [OutputFormat::Xml, OutputFormat::Json, OutputFormat::Markdown] {
        group.bench_function(format.to_string(), |b| {
            b.iter(|| {
                let scanner = Scanner::new(repo.path(), &config);
                let mut writer = create_writer(format, io::sink(), OutputOptions::from(&config));
                scanner.stream_to(writer.as_mut()).ok()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classifier,
    bench_transformer,
    bench_streaming_scan
);
criterion_main!(benches);
