use crate::habits::{HabitAction, NameError};
use crate::models::{Filter, HabitCard, HabitListResponse};

/// Feedback shown in the message area after a form post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added,
    EmptyName,
    DuplicateName,
    Cleared,
}

impl Notice {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "added" => Some(Self::Added),
            "empty" => Some(Self::EmptyName),
            "duplicate" => Some(Self::DuplicateName),
            "cleared" => Some(Self::Cleared),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::EmptyName => "empty",
            Self::DuplicateName => "duplicate",
            Self::Cleared => "cleared",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "Habit added.",
            Self::EmptyName => "Type a habit first.",
            Self::DuplicateName => "That habit already exists.",
            Self::Cleared => "Cleared.",
        }
    }

    fn kind(self) -> &'static str {
        match self {
            Self::Added | Self::Cleared => "ok",
            Self::EmptyName | Self::DuplicateName => "error",
        }
    }

    /// Where to redirect after a form post so the page shows this notice.
    pub fn location(self) -> String {
        format!("/?notice={}", self.code())
    }
}

impl From<NameError> for Notice {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Empty => Self::EmptyName,
            NameError::Duplicate => Self::DuplicateName,
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render_index(view: &HabitListResponse, notice: Option<Notice>) -> String {
    let (message, message_kind) = notice
        .map(|notice| (notice.message(), notice.kind()))
        .unwrap_or(("", ""));
    let cards: String = view.habits.iter().map(render_card).collect();
    let empty_display = if view.habits.is_empty() { "block" } else { "none" };

    page(
        INDEX_BODY
            .replace("{{MESSAGE_KIND}}", message_kind)
            .replace("{{MESSAGE}}", &escape_html(message))
            .replace("{{CHIPS}}", &render_chips(view.filter))
            .replace("{{EMPTY_DISPLAY}}", empty_display)
            .replace("{{CARDS}}", &cards),
    )
}

pub fn render_clear_confirm(habit_count: usize) -> String {
    let noun = if habit_count == 1 { "habit" } else { "habits" };
    page(
        CLEAR_BODY
            .replace("{{COUNT}}", &habit_count.to_string())
            .replace("{{NOUN}}", noun),
    )
}

fn render_chips(active: Filter) -> String {
    Filter::CHIPS
        .iter()
        .map(|filter| {
            let class = if *filter == active { "chip active" } else { "chip" };
            format!(
                r#"<button class="{class}" type="submit" name="filter" value="{value}" aria-pressed="{pressed}">{label}</button>"#,
                value = filter.as_str(),
                pressed = *filter == active,
                label = filter.label(),
            )
        })
        .collect()
}

fn render_card(card: &HabitCard) -> String {
    let id = escape_html(&card.id);
    let done_badge = if card.done_today {
        r#"<span class="badge success">Done today</span>"#
    } else {
        ""
    };
    let toggle_label = if card.done_today { "Undo today" } else { "Mark done today" };
    let (status, shelf_action, shelf_label) = if card.archived {
        ("Archived", HabitAction::Restore, "Restore")
    } else {
        ("Active", HabitAction::Archive, "Archive")
    };
    let streak_count = card.streak;
    let streak_unit = if card.streak == 1 { "day" } else { "days" };

    format!(
        r#"
      <article class="card">
        <div class="card-header">
          <div>
            <h3 class="title">{name}</h3>
            <p class="meta">Created: {created}</p>
            <p class="meta">Streak: <strong>{streak_count}</strong> {streak_unit} {done_badge}</p>
          </div>
          <span class="badge">{status}</span>
        </div>
        <form class="card-actions" method="post" action="/habits/action">
          <input type="hidden" name="id" value="{id}" />
          <button class="btn small success" type="submit" name="action" value="{toggle}" data-id="{id}">{toggle_label}</button>
          <button class="btn small" type="submit" name="action" value="{shelf}" data-id="{id}">{shelf_label}</button>
          <button class="btn small danger" type="submit" name="action" value="{delete}" data-id="{id}">Delete</button>
        </form>
      </article>"#,
        name = escape_html(&card.name),
        created = escape_html(&card.created_label),
        toggle = HabitAction::Toggle.as_str(),
        shelf = shelf_action.as_str(),
        delete = HabitAction::Delete.as_str(),
    )
}

fn page(body: String) -> String {
    PAGE_HTML.replace("{{BODY}}", &body)
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .add-form,
    .chips,
    .card-actions {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .add-form input {
      flex: 1;
      min-width: 200px;
      padding: 12px 16px;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font-size: 1rem;
    }

    .btn,
    .chip {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    .btn.small {
      padding: 8px 14px;
      font-size: 0.9rem;
    }

    .btn.success {
      background: var(--ok);
    }

    .btn.danger,
    .btn.ghost {
      background: transparent;
      color: var(--danger);
      border: 1px solid var(--danger);
    }

    .chip {
      background: rgba(47, 72, 88, 0.08);
      color: #6b645d;
    }

    .chip.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .toolbar {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      flex-wrap: wrap;
    }

    .list {
      display: grid;
      gap: 14px;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .card-header {
      display: flex;
      justify-content: space-between;
      gap: 12px;
    }

    .title {
      margin: 0 0 6px;
    }

    .meta {
      margin: 2px 0;
      color: #6f6a65;
    }

    .badge {
      align-self: start;
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.8rem;
      background: rgba(47, 72, 88, 0.08);
    }

    .badge.success {
      margin-left: 8px;
      background: rgba(45, 122, 75, 0.12);
      color: var(--ok);
    }

    .message {
      min-height: 1.2em;
      margin: 0;
      color: #6b645d;
    }

    .message[data-type="error"] {
      color: var(--danger);
    }

    .message[data-type="ok"] {
      color: var(--ok);
    }

    .empty {
      color: #8b857d;
      text-align: center;
    }
  </style>
</head>
<body>
  <main class="app">
{{BODY}}
  </main>
</body>
</html>
"#;

const INDEX_BODY: &str = r#"    <header>
      <h1>Habit Tracker</h1>
    </header>

    <form class="add-form" method="post" action="/habits">
      <input id="habitName" name="name" type="text" placeholder="New habit" autocomplete="off" autofocus />
      <button class="btn" type="submit">Add habit</button>
    </form>
    <p class="message" id="message" data-type="{{MESSAGE_KIND}}">{{MESSAGE}}</p>

    <div class="toolbar">
      <form class="chips" method="post" action="/filter">{{CHIPS}}</form>
      <a class="btn small ghost" id="clearDataBtn" href="/clear">Clear all</a>
    </div>

    <section class="list" id="habitList">{{CARDS}}
    </section>
    <p class="empty" id="emptyState" style="display: {{EMPTY_DISPLAY}};">No habits here yet.</p>
"#;

const CLEAR_BODY: &str = r#"    <header>
      <h1>Clear all habits?</h1>
    </header>
    <p>This removes all {{COUNT}} {{NOUN}} and cannot be undone.</p>
    <form class="card-actions" method="post" action="/clear">
      <button class="btn small danger" type="submit" name="confirm" value="yes">Clear everything</button>
      <a class="btn small" href="/">Cancel</a>
    </form>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, archived: bool, done_today: bool) -> HabitCard {
        HabitCard {
            id: "habit-1".to_string(),
            name: name.to_string(),
            created_label: "Oct 16, 2026".to_string(),
            streak: u32::from(done_today),
            streak_label: if done_today { "1 day" } else { "0 days" }.to_string(),
            done_today,
            archived,
        }
    }

    fn view(filter: Filter, habits: Vec<HabitCard>) -> HabitListResponse {
        HabitListResponse {
            filter,
            today: "2026-10-16".to_string(),
            habits,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn user_text_is_escaped_in_cards() {
        let html = render_index(&view(Filter::Active, vec![card("<script>x</script>", false, false)]), None);
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let html = render_index(&view(Filter::Active, Vec::new()), None);
        assert!(html.contains(r#"id="emptyState" style="display: block;""#));
        assert!(!html.contains(r#"class="card""#));
    }

    #[test]
    fn exactly_one_chip_is_active() {
        let html = render_index(&view(Filter::Archived, Vec::new()), None);
        assert_eq!(html.matches(r#"class="chip active""#).count(), 1);
        assert!(html.contains(r#"class="chip active" type="submit" name="filter" value="archived""#));
    }

    #[test]
    fn done_card_shows_badge_and_undo() {
        let html = render_index(&view(Filter::Active, vec![card("Walk", false, true)]), None);
        assert!(html.contains("Done today"));
        assert!(html.contains("Undo today"));
        assert!(html.contains("<strong>1</strong> day "));
        assert!(html.contains(r#"value="archive""#));
        assert!(html.contains(r#"id="emptyState" style="display: none;""#));
    }

    #[test]
    fn streak_markup_follows_the_count() {
        let mut walk = card("Walk", false, true);
        walk.streak = 12;
        walk.streak_label = "twelve".to_string();
        let html = render_index(&view(Filter::Active, vec![walk]), None);
        assert!(html.contains("<strong>12</strong> days "));
        assert!(!html.contains("twelve"));
    }

    #[test]
    fn archived_card_offers_restore() {
        let html = render_index(&view(Filter::Archived, vec![card("Walk", true, false)]), None);
        assert!(html.contains(r#"<span class="badge">Archived</span>"#));
        assert!(html.contains(r#"value="restore""#));
        assert!(!html.contains(r#"value="archive""#));
        assert!(html.contains("Mark done today"));
        assert!(html.contains("<strong>0</strong> days"));
    }

    #[test]
    fn notice_renders_in_message_area() {
        let html = render_index(&view(Filter::Active, Vec::new()), Some(Notice::DuplicateName));
        assert!(html.contains(r#"data-type="error">That habit already exists.</p>"#));
        assert_eq!(Notice::parse(Notice::Cleared.code()), Some(Notice::Cleared));
        assert_eq!(Notice::Added.location(), "/?notice=added");
    }

    #[test]
    fn clear_prompt_requires_confirmation() {
        let html = render_clear_confirm(1);
        assert!(html.contains("all 1 habit and"));
        assert!(html.contains(r#"name="confirm" value="yes""#));
        assert!(html.contains(r#"href="/">Cancel"#));
    }
}
