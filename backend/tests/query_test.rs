use chrono::Utc;
use tracker::models::{Course, CourseStatus, ImportantStatus, Project};
use tracker::query::{
    FilterSet, GroupKey, PAGE_SIZE, PageSession, UNKNOWN, category_summaries, chart_series,
    count_matching, distinct_values, group_counts, paginate, sub_category_options, total_pages,
};

fn course(id: &str, category: &str, sub_category: Option<&str>, hours: f64) -> Course {
    Course {
        id: id.to_string(),
        no: 1,
        name: format!("Course {}", id),
        category: category.to_string(),
        category_priority: Default::default(),
        sub_category: sub_category.map(str::to_string),
        sub_sub_category: None,
        important_status: ImportantStatus::Normal,
        status: CourseStatus::NotStartedYet,
        duration_in_hours: hours,
        sub_learning_skills_set: Vec::new(),
        learning_skills_set: None,
        notes: Vec::new(),
        date_added: Utc::now(),
    }
}

fn project(id: usize, category: &str, sub_category: Option<&str>) -> Project {
    Project {
        id: format!("p{}", id),
        title: format!("Project {}", id),
        description: None,
        category: Some(category.to_string()),
        sub_category: sub_category.map(str::to_string),
        tech: Vec::new(),
        link: None,
        live_demo: None,
    }
}

fn sample_courses() -> Vec<Course> {
    let mut courses = vec![
        course("a", "Backend", Some("Go"), 4.0),
        course("b", "Frontend", Some("React"), 10.0),
        course("c", "Backend", Some("Rust"), 20.0),
        course("d", "Backend", None, 1.5),
        course("e", "DevOps", Some("Docker"), 3.0),
    ];
    courses[1].important_status = ImportantStatus::Important;
    courses[2].status = CourseStatus::Completed;
    courses[2].important_status = ImportantStatus::Important;
    courses
}

#[test]
fn test_category_filter_returns_only_matches() {
    let courses = vec![course("1", "Backend", None, 1.0), course("2", "Frontend", None, 1.0)];
    let filter = FilterSet::new().with(GroupKey::Category, "Backend");

    let matched = filter.apply(&courses);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "1");
}

#[test]
fn test_empty_filter_passes_everything_in_order() {
    let courses = sample_courses();
    let matched = FilterSet::new().apply(&courses);
    let ids: Vec<&str> = matched.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_every_present_key_must_match() {
    let courses = sample_courses();
    let filter = FilterSet::new()
        .with(GroupKey::Category, "Backend")
        .with(GroupKey::ImportantStatus, "Important");

    let matched = filter.apply(&courses);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "c");
    assert!(matched.iter().all(|c| filter.matches(*c)));

    let filter = filter.with(GroupKey::Status, "In Progress");
    assert!(filter.apply(&courses).is_empty());
}

#[test]
fn test_choosing_category_clears_sub_category() {
    let mut filter = FilterSet::new()
        .with(GroupKey::Category, "Backend")
        .with(GroupKey::SubCategory, "Go");
    assert_eq!(filter.sub_category.as_deref(), Some("Go"));

    filter.set(GroupKey::Category, Some("Frontend".to_string()));
    assert_eq!(filter.category.as_deref(), Some("Frontend"));
    assert_eq!(filter.sub_category, None);

    filter.set(GroupKey::Category, Some(String::new()));
    assert!(filter.is_empty());
}

#[test]
fn test_sub_category_options_follow_category() {
    let courses = sample_courses();

    let all = sub_category_options(&courses, &FilterSet::new());
    assert_eq!(all, vec!["Go", "React", "Rust", "Docker"]);

    let backend = FilterSet::new().with(GroupKey::Category, "Backend");
    let options = sub_category_options(&courses, &backend);
    assert_eq!(options, vec!["Go", "Rust"]);

    let scoped = backend.category_only().apply(&courses);
    let distinct = distinct_values(scoped, GroupKey::SubCategory);
    assert!(options.iter().all(|o| distinct.contains(o)));
}

#[test]
fn test_group_counts_use_unknown_and_first_encounter_order() {
    let courses = sample_courses();
    let groups = group_counts(&courses, GroupKey::SubCategory);

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Go", "React", "Rust", UNKNOWN, "Docker"]);

    let by_category = group_counts(&courses, GroupKey::Category);
    assert_eq!(by_category[0].label, "Backend");
    assert_eq!(by_category[0].count, 3);
}

#[test]
fn test_group_counts_sum_to_filtered_size() {
    let courses = sample_courses();
    let filters = [
        FilterSet::new(),
        FilterSet::new().with(GroupKey::Category, "Backend"),
        FilterSet::new().with(GroupKey::ImportantStatus, "Important"),
        FilterSet::new().with(GroupKey::Category, "Nothing"),
    ];

    for filter in &filters {
        let filtered = filter.apply(&courses);
        for key in GroupKey::ALL {
            let total: usize = group_counts(filtered.iter().copied(), key)
                .iter()
                .map(|g| g.count)
                .sum();
            assert_eq!(total, filtered.len(), "{:?} grouped by {:?}", filter, key);
        }
    }
}

#[test]
fn test_projects_without_status_group_as_unknown() {
    let projects = vec![project(1, "Web", None), project(2, "Web", Some("API"))];
    let groups = group_counts(&projects, GroupKey::Status);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, UNKNOWN);
    assert_eq!(groups[0].count, 2);
}

#[test]
fn test_chart_series_is_parallel() {
    let courses = sample_courses();
    let series = chart_series(&courses, GroupKey::ImportantStatus, "Courses");
    assert_eq!(series.title, "Courses by ImportantStatus");
    assert_eq!(series.labels, vec!["Normal", "Important"]);
    assert_eq!(series.data, vec![3, 2]);
}

#[test]
fn test_count_matching_needs_a_selection() {
    let courses = sample_courses();
    assert_eq!(count_matching(&courses, GroupKey::Category, Some("Backend")), 3);
    assert_eq!(count_matching(&courses, GroupKey::Category, None), 0);
}

#[test]
fn test_category_summaries() {
    let courses = sample_courses();
    let summaries = category_summaries(&courses);

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].category, "Backend");
    assert_eq!(summaries[0].course_count, 3);
    assert_eq!(summaries[0].sub_categories, vec!["Go", "Rust"]);
    assert!((summaries[0].total_hours - 25.5).abs() < f64::EPSILON);
    assert_eq!(summaries[2].category, "DevOps");
}

#[test]
fn test_thirteen_projects_page_three_and_clamp() {
    let projects: Vec<Project> = (0..13).map(|i| project(i, "Web", None)).collect();

    let page = paginate(&projects, 3, PAGE_SIZE);
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "p12");

    let clamped = paginate(&projects, 10, PAGE_SIZE);
    assert_eq!(clamped.page, 3);
    assert_eq!(clamped.items, page.items);

    let low = paginate(&projects, 0, PAGE_SIZE);
    assert_eq!(low.page, 1);
    assert_eq!(low.items.len(), 6);
}

#[test]
fn test_page_lengths_match_formula() {
    for len in 0..20usize {
        let items: Vec<usize> = (0..len).collect();
        let pages = total_pages(len, PAGE_SIZE);
        assert_eq!(pages, len.div_ceil(PAGE_SIZE));

        let mut rebuilt = Vec::new();
        for n in 1..=pages {
            let page = paginate(&items, n, PAGE_SIZE);
            let expected = PAGE_SIZE.min(len.saturating_sub((n - 1) * PAGE_SIZE));
            assert_eq!(page.items.len(), expected);
            rebuilt.extend(page.items);
        }
        assert_eq!(rebuilt, items);
    }
}

#[test]
fn test_page_session_lifecycle() {
    let mut session = PageSession::new();
    assert_eq!(session.current("currentProjectPage"), 1);

    session.set("currentProjectPage", 3);
    assert_eq!(session.current("currentProjectPage"), 3);
    assert_eq!(session.current("other"), 1);

    session.end();
    assert_eq!(session.current("currentProjectPage"), 1);
}
