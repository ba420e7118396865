use divan::Bencher;
use spantrace::Profiler;
use tempfile::TempDir;

fn main() {
    divan::main();
}

struct BenchSetup {
    _temp_dir: TempDir,
    profiler: Profiler,
}

fn setup_session() -> BenchSetup {
    let temp_dir = TempDir::new().unwrap();
    let profiler = Profiler::new();
    profiler
        .start_session("bench", temp_dir.path().join("bench.json"))
        .unwrap();
    BenchSetup {
        _temp_dir: temp_dir,
        profiler,
    }
}

#[divan::bench]
fn bench_scoped_timer(bencher: Bencher) {
    let setup = setup_session();
    bencher.bench_local(|| {
        let _timer = setup.profiler.timer("bench_span");
    });
}

#[divan::bench]
fn bench_timer_outside_session(bencher: Bencher) {
    let profiler = Profiler::new();
    bencher.bench_local(|| {
        let _timer = profiler.timer("bench_span");
    });
}

#[divan::bench(args = [100, 10_000])]
fn bench_end_session(bencher: Bencher, spans: usize) {
    bencher
        .with_inputs(|| {
            let setup = setup_session();
            for _ in 0..spans {
                let _timer = setup.profiler.timer("bench_span");
            }
            setup
        })
        .bench_local_values(|setup| {
            setup.profiler.end_session().unwrap();
            setup
        });
}
