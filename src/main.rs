use stress_test::{stress_test_compaction, stress_test_product, stress_test_scaling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async_main());
}

async fn async_main() {

    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║            COMPACTION STRESS TESTS                          ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    // Test 1: few sequences, short windows
    let stats = stress_test_compaction(4, 100, 20).await;
    stats.print();

    // Test 2: many sequences, long windows
    let stats = stress_test_compaction(32, 200, 500).await;
    stats.print();

    // Test 3: coordinate enumeration
    stress_test_product(3, 64).await;
    stress_test_product(6, 8).await;

    // Test 4: Scaling analysis
    stress_test_scaling(16, 4).await;

    println!("\n✓ All stress tests completed successfully!");
}
