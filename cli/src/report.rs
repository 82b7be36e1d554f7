//! Plain-text reporting of benchmark results

use handbench_engine::distribution::Distribution;
use handbench_engine::scoring::reference_percentages;
use handbench_engine::{Category, RunReport};

pub fn print_run(label: &str, report: &RunReport) {
    println!("{}:", label);
    println!("  Hands:      {}", report.hands);
    println!("  Workers:    {}", report.workers);
    println!("  Duration:   {:.3} s", report.elapsed_secs());
    println!("  Throughput: {:.2}M evals/sec", report.hands_per_sec() / 1_000_000.0);
    println!("  Latency:    {:.2} ns/hand", report.nanos_per_hand());
    println!("  Checksum:   {:#018x}", report.checksum);
    if report.workers > 1 {
        let min = report.per_worker.iter().min().copied().unwrap_or(0);
        let max = report.per_worker.iter().max().copied().unwrap_or(0);
        println!("  Per worker: {} .. {} hands", min, max);
    }
    println!();
}

pub fn print_distribution(dist: &Distribution) {
    let reference = reference_percentages(dist.hand_size);
    println!("{} distribution ({} hands):", dist.hand_size, dist.total());
    println!("  {:<16}{:>10}{:>10}{:>10}", "Category", "Count", "Pct", "Expected");
    for (category, expected) in Category::ALL.iter().zip(reference.iter()) {
        println!(
            "  {:<16}{:>10}{:>9.3}%{:>9.3}%",
            category.name(),
            dist.count(*category),
            dist.percentage(*category),
            expected
        );
    }
    if dist.rejected() > 0 {
        println!("  Rejected:       {}", dist.rejected());
    }
    println!("  Max deviation:  {:.3} pp", dist.max_deviation());
    println!();
}
