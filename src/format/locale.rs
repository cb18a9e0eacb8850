//! Display Locale
//!
//! Every user-visible string the dashboard renders comes from here. Korean is
//! the default; English is available through configuration.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language for rendered text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

/// Fixed UI strings for one locale
#[derive(Debug)]
pub struct Messages {
    pub html_lang: &'static str,
    pub page_title: &'static str,
    pub loading: &'static str,
    pub no_reviews: &'static str,
    pub stats_load_failed: &'static str,
    pub reviews_load_failed: &'static str,
    pub detail_load_failed: &'static str,
    pub comments_label: &'static str,
    pub processing_time_label: &'static str,
    pub view_detail: &'static str,
    pub detail_title: &'static str,
    pub author_label: &'static str,
    pub review_stats_heading: &'static str,
    pub total_comments_label: &'static str,
    pub ai_model_label: &'static str,
    pub tokens_used_label: &'static str,
    pub no_comments: &'static str,
    pub error_heading: &'static str,
    pub category_dataset_label: &'static str,
    pub total_repositories_label: &'static str,
    pub total_reviews_label: &'static str,
    pub avg_processing_time_label: &'static str,
    pub total_pull_requests_label: &'static str,
    pub avg_comments_label: &'static str,
    pub total_tokens_label: &'static str,
    pub reviews_today_label: &'static str,
    pub reviews_this_week_label: &'static str,
    pub reviews_this_month_label: &'static str,
    pub last_review_label: &'static str,
    pub severity_chart_title: &'static str,
    pub category_chart_title: &'static str,
    pub trend_chart_title: &'static str,
    pub daily_reviews_label: &'static str,
    pub daily_comments_label: &'static str,
    pub daily_issues_label: &'static str,
    pub recent_reviews_title: &'static str,
    pub repositories_title: &'static str,
    pub repository_label: &'static str,
    pub no_repositories: &'static str,
    pub repositories_load_failed: &'static str,
}

const KO: Messages = Messages {
    html_lang: "ko",
    page_title: "코드 리뷰 대시보드",
    loading: "로딩 중...",
    no_reviews: "리뷰가 없습니다.",
    stats_load_failed: "통계 데이터를 불러오는데 실패했습니다.",
    reviews_load_failed: "최근 리뷰를 불러오는데 실패했습니다.",
    detail_load_failed: "리뷰 상세 정보를 불러오는데 실패했습니다.",
    comments_label: "코멘트",
    processing_time_label: "처리 시간",
    view_detail: "상세보기 →",
    detail_title: "리뷰 상세 정보",
    author_label: "작성자",
    review_stats_heading: "리뷰 통계",
    total_comments_label: "총 코멘트",
    ai_model_label: "AI 모델",
    tokens_used_label: "토큰 사용",
    no_comments: "코멘트가 없습니다.",
    error_heading: "오류",
    category_dataset_label: "이슈 수",
    total_repositories_label: "저장소",
    total_reviews_label: "총 리뷰",
    avg_processing_time_label: "평균 처리 시간",
    total_pull_requests_label: "Pull Request",
    avg_comments_label: "리뷰당 평균 코멘트",
    total_tokens_label: "총 토큰 사용",
    reviews_today_label: "오늘",
    reviews_this_week_label: "이번 주",
    reviews_this_month_label: "이번 달",
    last_review_label: "마지막 리뷰",
    severity_chart_title: "심각도 분포",
    category_chart_title: "카테고리 분포",
    trend_chart_title: "일별 추이",
    daily_reviews_label: "리뷰",
    daily_comments_label: "코멘트",
    daily_issues_label: "이슈",
    recent_reviews_title: "최근 리뷰",
    repositories_title: "저장소별 통계",
    repository_label: "저장소",
    no_repositories: "저장소가 없습니다.",
    repositories_load_failed: "저장소 통계를 불러오는데 실패했습니다.",
};

const EN: Messages = Messages {
    html_lang: "en",
    page_title: "Code Review Dashboard",
    loading: "Loading...",
    no_reviews: "No reviews yet.",
    stats_load_failed: "Failed to load statistics.",
    reviews_load_failed: "Failed to load recent reviews.",
    detail_load_failed: "Failed to load review details.",
    comments_label: "Comments",
    processing_time_label: "Processing time",
    view_detail: "View details →",
    detail_title: "Review Details",
    author_label: "Author",
    review_stats_heading: "Review Statistics",
    total_comments_label: "Total comments",
    ai_model_label: "AI model",
    tokens_used_label: "Tokens used",
    no_comments: "No comments.",
    error_heading: "Error",
    category_dataset_label: "Issues",
    total_repositories_label: "Repositories",
    total_reviews_label: "Reviews",
    avg_processing_time_label: "Avg. processing time",
    total_pull_requests_label: "Pull requests",
    avg_comments_label: "Avg. comments per review",
    total_tokens_label: "Tokens used",
    reviews_today_label: "Today",
    reviews_this_week_label: "This week",
    reviews_this_month_label: "This month",
    last_review_label: "Last review",
    severity_chart_title: "Severity Distribution",
    category_chart_title: "Category Distribution",
    trend_chart_title: "Daily Trend",
    daily_reviews_label: "Reviews",
    daily_comments_label: "Comments",
    daily_issues_label: "Issues",
    recent_reviews_title: "Recent Reviews",
    repositories_title: "Repository Statistics",
    repository_label: "Repository",
    no_repositories: "No repositories yet.",
    repositories_load_failed: "Failed to load repository statistics.",
};

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Locale {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::Ko => &KO,
            Locale::En => &EN,
        }
    }

    /// Token for a zero or missing duration
    pub fn zero_duration(&self) -> &'static str {
        match self {
            Locale::Ko => "0초",
            Locale::En => "0s",
        }
    }

    /// Seconds with one decimal place
    pub fn seconds(&self, secs: f64) -> String {
        match self {
            Locale::Ko => format!("{:.1}초", secs),
            Locale::En => format!("{:.1}s", secs),
        }
    }

    pub fn just_now(&self) -> &'static str {
        match self {
            Locale::Ko => "방금 전",
            Locale::En => "just now",
        }
    }

    pub fn minutes_ago(&self, minutes: i64) -> String {
        match self {
            Locale::Ko => format!("{}분 전", minutes),
            Locale::En => format!("{} min ago", minutes),
        }
    }

    pub fn hours_ago(&self, hours: i64) -> String {
        match self {
            Locale::Ko => format!("{}시간 전", hours),
            Locale::En if hours == 1 => "1 hour ago".to_string(),
            Locale::En => format!("{} hours ago", hours),
        }
    }

    /// Heading for the comment list in the detail view
    pub fn comments_heading(&self, count: usize) -> String {
        match self {
            Locale::Ko => format!("코멘트 ({}개)", count),
            Locale::En => format!("Comments ({})", count),
        }
    }

    /// Long date with two-digit 12-hour time
    pub fn absolute_datetime(&self, dt: &DateTime<FixedOffset>) -> String {
        let (pm, hour) = dt.hour12();
        match self {
            Locale::Ko => format!(
                "{}년 {}월 {}일 {} {:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                if pm { "오후" } else { "오전" },
                hour,
                dt.minute()
            ),
            Locale::En => format!(
                "{} {}, {} at {:02}:{:02} {}",
                EN_MONTHS[dt.month0() as usize],
                dt.day(),
                dt.year(),
                hour,
                dt.minute(),
                if pm { "PM" } else { "AM" }
            ),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        })
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 15, h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_korean_absolute_datetime() {
        assert_eq!(Locale::Ko.absolute_datetime(&at(14, 30)), "2024년 1월 15일 오후 02:30");
        assert_eq!(Locale::Ko.absolute_datetime(&at(0, 5)), "2024년 1월 15일 오전 12:05");
    }

    #[test]
    fn test_english_absolute_datetime() {
        assert_eq!(Locale::En.absolute_datetime(&at(9, 7)), "January 15, 2024 at 09:07 AM");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ko-KR".parse::<Locale>().unwrap(), Locale::Ko);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
