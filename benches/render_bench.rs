//! Benchmarks for dashboard rendering
//!
//! Run with: cargo bench

use chrono::{DateTime, FixedOffset, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use review_dashboard::chart::ChartSlots;
use review_dashboard::format::Locale;
use review_dashboard::model::{
    CategoryDistribution, Comment, DashboardStatistics, OverallStats, PullRequestInfo,
    RecentActivity, RepositoryRef, ReviewDetail, ReviewSummary, Severity, SeverityCounts,
};
use review_dashboard::page::{DocumentOptions, ModalState, Page};
use review_dashboard::render::{
    apply_review_list, apply_statistics, render_review_detail, ReviewListView, StatisticsView,
};

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 10, 12, 0, 0)
        .unwrap()
}

fn create_statistics() -> DashboardStatistics {
    DashboardStatistics {
        overall_stats: OverallStats {
            total_repositories: 12,
            total_pull_requests: 340,
            total_reviews: 512,
            total_comments: 4096,
            average_comments_per_review: 8.0,
            average_processing_time_ms: 4200,
            total_tokens_used: 1_250_000,
        },
        recent_activity: Some(RecentActivity {
            reviews_today: 4,
            reviews_this_week: 31,
            reviews_this_month: 120,
            last_review_time: Some("2024-03-10T11:58:00".to_string()),
        }),
        severity_distribution: Some(SeverityCounts::new(2000, 1500, 596)),
        category_distribution: Some(CategoryDistribution::from_pairs([
            ("security", 300),
            ("performance", 800),
            ("style", 1900),
            ("correctness", 1096),
        ])),
    }
}

fn create_reviews(count: usize) -> Vec<ReviewSummary> {
    (0..count)
        .map(|i| ReviewSummary {
            id: i as u64,
            repository_owner: "acme".to_string(),
            repository_name: format!("service-{}", i % 7),
            pr_number: 100 + i as u64,
            pr_title: format!("Refactor <module> {} & tidy imports", i),
            created_at: Some(format!("2024-03-{:02}T09:00:00", 1 + i % 9)),
            total_comments: (i % 13) as u64,
            severity_counts: SeverityCounts::new(i as u64 % 3, i as u64 % 5, i as u64 % 2),
            processing_time_ms: Some(350 + i as u64 * 40),
            ..Default::default()
        })
        .collect()
}

fn create_detail(comments: usize) -> ReviewDetail {
    ReviewDetail {
        id: 1,
        review_status: "completed".to_string(),
        created_at: Some("2024-03-10T10:00:00".to_string()),
        total_comments: comments as u64,
        severity_counts: SeverityCounts::new(1, 2, 3),
        processing_time_ms: Some(5300),
        commit_sha: Some("0123456789abcdef".to_string()),
        repository: RepositoryRef {
            owner: "acme".to_string(),
            name: "api".to_string(),
        },
        pull_request: PullRequestInfo {
            number: 42,
            title: "Speed up cache".to_string(),
            author: "lee".to_string(),
            description: Some("Avoids cloning entries on every lookup.".to_string()),
        },
        ai_model: Some("gpt-4".to_string()),
        tokens_used: Some(3200),
        comments: (0..comments)
            .map(|i| Comment {
                severity: Severity::CHART_ORDER[i % 3],
                category: "performance".to_string(),
                file_path: format!("src/cache/{}.rs", i),
                line_number: Some(i as u32 + 1),
                message: "Clone inside a hot loop".to_string(),
                suggestion: Some("Borrow the entry instead".to_string()),
                code_example: Some("let entry = &map[&key];".to_string()),
            })
            .collect(),
        error_message: None,
    }
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let stats = create_statistics();

    group.bench_function("build_view", |b| {
        b.iter(|| StatisticsView::build(black_box(&stats), now(), Locale::Ko))
    });

    group.bench_function("apply_to_page", |b| {
        let mut page = Page::new(Locale::Ko);
        let mut charts = ChartSlots::default();

        b.iter(|| {
            let view = StatisticsView::build(&stats, now(), Locale::Ko);
            apply_statistics(&mut page, &mut charts, black_box(view))
        });
    });

    group.finish();
}

fn bench_review_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("review_list");

    for size in [10, 50, 200] {
        let reviews = create_reviews(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("to_html_{}", size), |b| {
            b.iter(|| {
                ReviewListView::build(black_box(&reviews), now(), Locale::Ko).to_html(Locale::Ko, true)
            })
        });
    }

    group.finish();
}

fn bench_detail(c: &mut Criterion) {
    let mut group = c.benchmark_group("detail");

    for size in [0, 20, 100] {
        let detail = create_detail(size);

        group.bench_function(format!("render_{}_comments", size), |b| {
            b.iter(|| render_review_detail(black_box(&detail), now(), Locale::En))
        });
    }

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let mut page = Page::new(Locale::Ko);
    let mut charts = ChartSlots::default();
    apply_statistics(
        &mut page,
        &mut charts,
        StatisticsView::build(&create_statistics(), now(), Locale::Ko),
    );
    apply_review_list(
        &mut page,
        &ReviewListView::build(&create_reviews(10), now(), Locale::Ko),
        Locale::Ko,
        true,
    );
    let options = DocumentOptions::default();

    c.bench_function("render_document", |b| {
        b.iter(|| page.render_document(black_box(&options), &ModalState::default()))
    });
}

criterion_group!(
    benches,
    bench_statistics,
    bench_review_list,
    bench_detail,
    bench_document
);
criterion_main!(benches);
