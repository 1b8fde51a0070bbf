use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use maze_search::algorithms::Algorithm;
use maze_search::algorithms::solve;
use maze_search::engine::SearchOptions;
use maze_search::maze_2d::MazeHeuristicManhattan;
use maze_search::maze_2d::MazeProblem;

fn run(problem: &MazeProblem, algorithm: Algorithm) -> usize {
    let result = solve::<MazeHeuristicManhattan, _, _, _, _>(
        problem.space(),
        problem.start(),
        problem.goal(),
        algorithm,
        &SearchOptions::default(),
    )
    .unwrap();

    result.steps
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze2D Search");

    let base = MazeProblem::open_grid(64, 64, (0, 0), (63, 63)).unwrap();

    for i in 0..3 {
        let mut rng = ChaCha8Rng::seed_from_u64(i);

        if let Some(problem) = base.randomize(&mut rng) {
            let instance_name = format!("64x64:{i}");

            for algorithm in Algorithm::ALL {
                group.bench_with_input(
                    BenchmarkId::new(algorithm.to_string(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| run(p, algorithm)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
