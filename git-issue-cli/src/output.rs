// ABOUTME: Terminal formatters for issue listings and issue detail views
// ABOUTME: Column alignment is display-width aware; colors follow a fixed mapping

use chrono::{DateTime, Utc};
use gitlab_sdk::{Issue, Note};
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const SEPARATOR_WIDTH: usize = 80;
const COMMENT_RULE_WIDTH: usize = 78;
const PROP_NAME_WIDTH: usize = 18;
const PROP_VALUE_WIDTH: usize = 24;

/// Rendered width of `text` in terminal columns, counting wide characters
/// as two. Raw byte or char length would misalign CJK titles.
fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn pad_to_width(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(padding))
}

fn paint_id(text: &str, use_color: bool) -> String {
    if use_color {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn paint_state(text: &str, use_color: bool) -> String {
    if use_color {
        text.blue().to_string()
    } else {
        text.to_string()
    }
}

fn paint_author(text: &str, use_color: bool) -> String {
    if use_color {
        text.magenta().to_string()
    } else {
        text.to_string()
    }
}

fn paint_labels(text: &str, use_color: bool) -> String {
    if use_color {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

/// Header form shared by the detail view and the command confirmations:
/// `[<state>] #<iid> <title>`.
pub fn issue_title(issue: &Issue, use_color: bool) -> String {
    format!(
        "[{}] {} {}",
        paint_state(&issue.state.to_string(), use_color),
        paint_id(&format!("#{}", issue.iid), use_color),
        issue.title
    )
}

/// Relative wording for comment headers, e.g. "3 days".
pub fn time_ago_in_words(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const HOUR: i64 = 60;
    const DAY: i64 = 60 * 24;
    const MONTH: i64 = DAY * 30;
    const YEAR: i64 = DAY * 365;

    let minutes = (now - then).num_minutes().max(0);
    match minutes {
        m if m < 1 => "less than a minute".to_string(),
        m if m < 2 => "a minute".to_string(),
        m if m < HOUR => format!("{m} minutes"),
        m if m < 2 * HOUR => "about an hour".to_string(),
        m if m < DAY => format!("about {} hours", m / HOUR),
        m if m < 2 * DAY => "a day".to_string(),
        m if m < MONTH => format!("{} days", m / DAY),
        m if m < 2 * MONTH => "about a month".to_string(),
        m if m < YEAR => format!("{} months", m / MONTH),
        m if m < 2 * YEAR => "about a year".to_string(),
        m => format!("{} years", m / YEAR),
    }
}

/// Renders one aligned, colorized line per issue.
pub struct ListFormatter {
    use_color: bool,
}

impl ListFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Issues are assumed already filtered and sorted by the caller.
    /// `comment_counts`, when present, pairs with `issues` by index and
    /// appends a trailing comment-count column.
    pub fn render(&self, issues: &[Issue], comment_counts: Option<&[usize]>) -> Vec<String> {
        let title_width = issues
            .iter()
            .map(|issue| display_width(&issue.title))
            .max()
            .unwrap_or(0);
        let labels_width = issues
            .iter()
            .map(|issue| display_width(&issue.joined_labels()))
            .max()
            .unwrap_or(0);
        let author_width = issues
            .iter()
            .map(|issue| display_width(&issue.author.username))
            .max()
            .unwrap_or(0);

        issues
            .iter()
            .enumerate()
            .map(|(n, issue)| {
                let mut line = format!(
                    "{} {} {} {} {} {} {}",
                    paint_id(&format!("#{:<4}", issue.iid), self.use_color),
                    paint_state(&issue.state.to_string(), self.use_color),
                    pad_to_width(&issue.title, title_width),
                    paint_labels(
                        &pad_to_width(&issue.joined_labels(), labels_width),
                        self.use_color
                    ),
                    paint_author(
                        &pad_to_width(&issue.author.username, author_width),
                        self.use_color
                    ),
                    issue.created_at.format(DATE_FORMAT),
                    issue.updated_at.format(DATE_FORMAT),
                );
                if let Some(counts) = comment_counts {
                    line.push_str(&format!(" {} comments", counts[n]));
                }
                line
            })
            .collect()
    }
}

/// Renders a single issue with its metadata and comment thread.
pub struct DetailFormatter {
    use_color: bool,
    now: DateTime<Utc>,
}

impl DetailFormatter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            now: Utc::now(),
        }
    }

    /// Fixed reference time for deterministic relative-time output.
    pub fn with_reference_time(use_color: bool, now: DateTime<Utc>) -> Self {
        Self { use_color, now }
    }

    pub fn render(&self, issue: &Issue, comments: &[Note], web_url: &str) -> String {
        let mut lines = vec![String::new()];

        lines.push(issue_title(issue, self.use_color));
        lines.push("-".repeat(SEPARATOR_WIDTH));
        lines.push(format!(
            "{} opened this issue {}",
            issue.author.username,
            issue.created_at.format(TIMESTAMP_FORMAT)
        ));
        lines.push(String::new());

        // Metadata rows, packed two per line.
        let mut props = vec![("comments", comments.len().to_string())];
        if let Some(milestone) = &issue.milestone {
            props.push(("milestone", milestone.title.clone()));
        }
        for (n, (name, value)) in props.iter().enumerate() {
            let row = format!(
                "{} : {}",
                pad_to_width(name, PROP_NAME_WIDTH),
                pad_to_width(value, PROP_VALUE_WIDTH)
            );
            if n % 2 == 0 {
                lines.push(row);
            } else {
                let last = lines.last_mut().expect("a row was just pushed");
                last.push(' ');
                last.push_str(&row);
            }
        }

        lines.push(format!(
            "{} : {}",
            pad_to_width("labels", PROP_NAME_WIDTH),
            paint_labels(&issue.labels.join(", "), self.use_color)
        ));
        lines.push(format!(
            "{} : {}",
            pad_to_width("html_url", PROP_NAME_WIDTH),
            web_url
        ));
        lines.push(format!(
            "{} : {}",
            pad_to_width("updated_at", PROP_NAME_WIDTH),
            issue.updated_at.format(TIMESTAMP_FORMAT)
        ));

        lines.push("-".repeat(SEPARATOR_WIDTH));
        lines.push(issue.description.clone().unwrap_or_default());
        lines.push(String::new());

        if !comments.is_empty() {
            lines.push("-".repeat(SEPARATOR_WIDTH));
            lines.push(String::new());

            let mut ordered: Vec<&Note> = comments.iter().collect();
            ordered.sort_by_key(|note| note.created_at);
            for (n, note) in ordered.iter().enumerate() {
                for line in self.comment_lines(note, n + 1) {
                    lines.push(format!("  {line}"));
                }
            }
        }

        lines.join("\n")
    }

    fn comment_lines(&self, note: &Note, ordinal: usize) -> Vec<String> {
        let mut lines = vec![format!(
            "#{ordinal} - {} updated {} ago",
            note.author.username,
            time_ago_in_words(note.created_at, self.now)
        )];
        lines.push("-".repeat(COMMENT_RULE_WIDTH));
        if let Some(body) = &note.body {
            lines.extend(body.split('\n').map(str::to_string));
        }
        lines.push(String::new());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use gitlab_sdk::{IssueState, Milestone, User};

    fn date(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    fn issue(iid: u64, title: &str, labels: &[&str], author: &str) -> Issue {
        Issue {
            id: iid + 500,
            iid,
            title: title.to_string(),
            description: Some("It broke".to_string()),
            state: IssueState::Opened,
            labels: labels.iter().map(|s| s.to_string()).collect(),
            milestone: None,
            assignee: None,
            author: User {
                username: author.to_string(),
                name: None,
            },
            created_at: date("2013-11-14T12:30:00Z"),
            updated_at: date("2013-11-15T09:00:00Z"),
        }
    }

    fn note(id: u64, author: &str, body: &str, created_at: &str) -> Note {
        Note {
            id,
            body: Some(body.to_string()),
            author: User {
                username: author.to_string(),
                name: None,
            },
            created_at: date(created_at),
        }
    }

    #[test]
    fn test_list_columns_justified_to_widest_cell() {
        let formatter = ListFormatter::new(false);
        let issues = vec![
            issue(1, "Fix login", &["bug", "urgent"], "alice"),
            issue(23, "日本語のタイトル", &[], "bob"),
        ];

        let lines = formatter.render(&issues, None);

        // Widths over the set: title 16 ("日本語のタイトル"), labels 10
        // ("bug,urgent"), author 5 ("alice").
        let expected_a = [
            format!("#{:<4}", 1),
            "opened".to_string(),
            pad_to_width("Fix login", 16),
            pad_to_width("bug,urgent", 10),
            pad_to_width("alice", 5),
            "2013/11/14".to_string(),
            "2013/11/15".to_string(),
        ]
        .join(" ");
        let expected_b = [
            format!("#{:<4}", 23),
            "opened".to_string(),
            pad_to_width("日本語のタイトル", 16),
            pad_to_width("", 10),
            pad_to_width("bob", 5),
            "2013/11/14".to_string(),
            "2013/11/15".to_string(),
        ]
        .join(" ");
        assert_eq!(lines, vec![expected_a, expected_b]);
    }

    #[test]
    fn test_list_multibyte_title_sets_column_width() {
        // "日本語のタイトル" renders 16 columns wide even though it is 8 chars.
        let formatter = ListFormatter::new(false);
        let issues = vec![
            issue(1, "日本語のタイトル", &[], "a"),
            issue(2, "short", &[], "a"),
        ];

        let lines = formatter.render(&issues, None);
        // The short title is padded to the wide title's rendered width.
        let padded = format!("{} {} {}", pad_to_width("short", 16), "", "a");
        assert!(lines[1].contains(&padded));
    }

    #[test]
    fn test_list_comment_count_column() {
        let formatter = ListFormatter::new(false);
        let issues = vec![
            issue(1, "one", &[], "a"),
            issue(2, "two", &[], "a"),
        ];

        let lines = formatter.render(&issues, Some(&[3, 0]));
        assert!(lines[0].ends_with(" 3 comments"));
        assert!(lines[1].ends_with(" 0 comments"));
    }

    #[test]
    fn test_list_colors_are_applied() {
        let formatter = ListFormatter::new(true);
        let lines = formatter.render(&[issue(1, "colored", &["bug"], "alice")], None);
        assert!(lines[0].contains("\x1b["));

        let plain = ListFormatter::new(false).render(&[issue(1, "colored", &["bug"], "alice")], None);
        assert!(!plain[0].contains("\x1b["));
    }

    #[test]
    fn test_empty_listing_renders_no_lines() {
        let formatter = ListFormatter::new(false);
        assert!(formatter.render(&[], None).is_empty());
    }

    #[test]
    fn test_issue_title_header() {
        let subject = issue(1234, "Login page 500s", &[], "bob");
        assert_eq!(issue_title(&subject, false), "[opened] #1234 Login page 500s");
    }

    #[test]
    fn test_detail_view_layout() {
        let mut subject = issue(1234, "Login page 500s", &["bug", "urgent"], "bob");
        subject.milestone = Some(Milestone {
            title: "v1.2".to_string(),
        });
        let comments = vec![
            note(2, "alice", "second comment", "2013-11-15T12:00:00Z"),
            note(1, "bob", "first comment\nwith two lines", "2013-11-14T12:00:00Z"),
        ];
        let now = Utc.with_ymd_and_hms(2013, 11, 17, 12, 0, 0).unwrap();
        let formatter = DetailFormatter::with_reference_time(false, now);

        let text = formatter.render(
            &subject,
            &comments,
            "https://gitlab.example.com/yuroyoro/gitterb/issues/1234",
        );
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "[opened] #1234 Login page 500s");
        assert_eq!(lines[2], "-".repeat(80));
        assert_eq!(lines[3], "bob opened this issue 2013-11-14 12:30:00 UTC");
        assert_eq!(lines[4], "");
        assert_eq!(
            lines[5],
            format!("{:<18} : {:<24} {:<18} : {:<24}", "comments", "2", "milestone", "v1.2")
        );
        assert_eq!(lines[6], format!("{:<18} : bug, urgent", "labels"));
        assert_eq!(
            lines[7],
            format!(
                "{:<18} : https://gitlab.example.com/yuroyoro/gitterb/issues/1234",
                "html_url"
            )
        );
        assert_eq!(lines[8], format!("{:<18} : 2013-11-15 09:00:00 UTC", "updated_at"));
        assert_eq!(lines[9], "-".repeat(80));
        assert_eq!(lines[10], "It broke");
    }

    #[test]
    fn test_detail_comments_are_oldest_first() {
        let subject = issue(1234, "Login page 500s", &[], "bob");
        // API order is newest-first; display must be oldest-first.
        let comments = vec![
            note(2, "alice", "second comment", "2013-11-15T12:00:00Z"),
            note(1, "bob", "first comment", "2013-11-14T12:00:00Z"),
        ];
        let now = Utc.with_ymd_and_hms(2013, 11, 17, 12, 0, 0).unwrap();
        let formatter = DetailFormatter::with_reference_time(false, now);

        let text = formatter.render(&subject, &comments, "https://example.com/x");

        let first = text.find("#1 - bob updated 3 days ago").unwrap();
        let second = text.find("#2 - alice updated 2 days ago").unwrap();
        assert!(first < second);
        // Thread lines are indented two spaces, with a 78-dash rule per comment.
        assert!(text.contains("\n  #1 - bob"));
        assert!(text.contains(&format!("\n  {}", "-".repeat(78))));
        assert!(text.contains("\n  first comment"));
    }

    #[test]
    fn test_detail_omits_milestone_and_thread_when_absent() {
        let subject = issue(7, "No extras", &[], "bob");
        let formatter = DetailFormatter::with_reference_time(false, Utc::now());

        let text = formatter.render(&subject, &[], "https://example.com/x");

        assert!(!text.contains("milestone"));
        // Exactly one separator pair: title rule and description rule.
        let separators = text
            .split('\n')
            .filter(|line| *line == "-".repeat(80))
            .count();
        assert_eq!(separators, 2);
        assert!(text.contains(&format!("{:<18} : 0", "comments")));
    }

    #[test]
    fn test_time_ago_in_words() {
        let now = Utc.with_ymd_and_hms(2013, 11, 17, 12, 0, 0).unwrap();
        let ago = |seconds: i64| now - chrono::Duration::seconds(seconds);

        assert_eq!(time_ago_in_words(ago(30), now), "less than a minute");
        assert_eq!(time_ago_in_words(ago(90), now), "a minute");
        assert_eq!(time_ago_in_words(ago(30 * 60), now), "30 minutes");
        assert_eq!(time_ago_in_words(ago(90 * 60), now), "about an hour");
        assert_eq!(time_ago_in_words(ago(5 * 3600), now), "about 5 hours");
        assert_eq!(time_ago_in_words(ago(26 * 3600), now), "a day");
        assert_eq!(time_ago_in_words(ago(3 * 86400), now), "3 days");
        assert_eq!(time_ago_in_words(ago(40 * 86400), now), "about a month");
        assert_eq!(time_ago_in_words(ago(200 * 86400), now), "6 months");
        assert_eq!(time_ago_in_words(ago(3 * 365 * 86400), now), "3 years");
        // Future timestamps clamp to the smallest bucket.
        assert_eq!(
            time_ago_in_words(now + chrono::Duration::seconds(30), now),
            "less than a minute"
        );
    }

    #[test]
    fn test_pad_to_width_is_display_width_aware() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("日本", 6), "日本  ");
        assert_eq!(pad_to_width("too long", 3), "too long");
    }
}
