//! Benchmarks for the posix-lexer crate.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

#[cfg(unix)]
mod unix {
    use criterion::Criterion;
    use posix_lexer::{Token, TokenizerOptions};

    fn uncached_tokenize(content: &str) -> Vec<Token> {
        posix_lexer::uncached_tokenize_str(content, &TokenizerOptions::default()).unwrap()
    }

    fn cacheable_tokenize(content: &str) -> Vec<Token> {
        posix_lexer::tokenize_str_with_options(content, &TokenizerOptions::default()).unwrap()
    }

    const SIMPLE_SCRIPT: &str = "echo hello world";

    const PIPELINE_SCRIPT: &str = "cat file.txt | grep pattern | wc -l >>out.log 2>&1";

    const QUOTED_SCRIPT: &str = r#"printf '%s\n' "a \"quoted\" word" 'single'"double"\ escaped"#;

    const COMPLEX_SCRIPT: &str = r#"
#!/bin/sh
# Complex script with multiple constructs

for f in *.txt; do
    if test -f "$f"; then
        while read -r line; do
            case "$line" in
                start*) echo 'starting' ;;
                stop*) echo "stopping $line" ;;
                *) : ;;
            esac
        done <"$f"
    else
        echo "skipping $f" >&2 || true
    fi
done
"#;

    fn benchmark_tokenizing_script_using_caches(c: &mut Criterion, script_path: &std::path::Path) {
        let contents = std::fs::read_to_string(script_path).unwrap();
        let filename = script_path.file_name().unwrap().to_string_lossy();

        // Real-world scripts may use quoting beyond POSIX token recognition, so
        // failures are measured too.
        c.bench_function(std::format!("tokenize_cached_{filename}").as_str(), |b| {
            b.iter(|| posix_lexer::tokenize_str(contents.as_str()).ok());
        });
    }

    pub(crate) fn criterion_benchmark(c: &mut Criterion) {
        const POSSIBLE_BASH_COMPLETION_SCRIPT_PATH: &str =
            "/usr/share/bash-completion/bash_completion";

        c.bench_function("tokenize_simple", |b| {
            b.iter(|| uncached_tokenize(SIMPLE_SCRIPT));
        });

        c.bench_function("tokenize_pipeline", |b| {
            b.iter(|| uncached_tokenize(PIPELINE_SCRIPT));
        });

        c.bench_function("tokenize_quoted", |b| {
            b.iter(|| uncached_tokenize(QUOTED_SCRIPT));
        });

        c.bench_function("tokenize_complex", |b| {
            b.iter(|| uncached_tokenize(COMPLEX_SCRIPT));
        });

        c.bench_function("tokenize_complex_cached", |b| {
            b.iter(|| cacheable_tokenize(COMPLEX_SCRIPT));
        });

        // A large real-world script, if one is installed.
        let well_known_complicated_script =
            std::path::PathBuf::from(POSSIBLE_BASH_COMPLETION_SCRIPT_PATH);

        if well_known_complicated_script.exists() {
            benchmark_tokenizing_script_using_caches(c, &well_known_complicated_script);
        }
    }
}

#[cfg(unix)]
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default();
    targets = unix::criterion_benchmark
}

#[cfg(unix)]
criterion::criterion_main!(benches);

#[cfg(not(unix))]
fn main() {}
