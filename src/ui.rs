use crate::models::{DayColumn, DayOfWeek, Task, WeekView};

pub fn render_index(view: &WeekView) -> String {
    let columns: String = view.days.iter().map(render_column).collect();

    INDEX_HTML
        .replace("{{THEME}}", view.theme.as_str())
        .replace("{{RANGE}}", &escape_html(&view.range))
        .replace("{{PREV_DISABLED}}", disabled(view.navigation.can_go_back))
        .replace("{{NEXT_DISABLED}}", disabled(view.navigation.can_go_forward))
        .replace("{{DAY_OPTIONS}}", &day_options(None))
        .replace("{{WEEKLY}}", &format!("{:.0}", view.progress.weekly))
        .replace("{{DAILY}}", &format!("{:.0}", view.progress.daily))
        .replace("{{CELEBRATION}}", if view.celebrating { CELEBRATION_HTML } else { "" })
        .replace("{{COLUMNS}}", &columns)
}

fn render_column(column: &DayColumn) -> String {
    let items: String = column.tasks.iter().map(render_task).collect();
    let class = if column.is_today { "day today" } else { "day" };
    format!(
        r#"<section class="{class}"><h2>{label}</h2><ul>{items}</ul></section>"#,
        label = escape_html(&column.label),
    )
}

fn render_task(task: &Task) -> String {
    let id = task.id;
    let class = if task.completed { "task completed" } else { "task" };
    let checked = if task.completed { "checked" } else { "" };
    let time = task
        .time
        .as_deref()
        .map(|time| format!(r#"<span class="time">{time}</span>"#))
        .unwrap_or_default();

    format!(
        r#"<li class="{class}">
  <form method="post" action="/tasks/{id}/toggle" class="inline"><input type="checkbox" {checked} onchange="this.form.submit()" aria-label="done" /></form>
  {time}<span class="text">{text}</span>
  <details><summary>Edit</summary>
    <form method="post" action="/tasks/{id}/edit"><input name="text" value="{text}" required /><button type="submit">Update</button></form>
    <form method="post" action="/tasks/{id}/move"><select name="day">{options}</select><button type="submit">Move</button></form>
  </details>
  <form method="post" action="/tasks/{id}/delete" class="inline"><button type="submit" class="delete">Delete</button></form>
</li>"#,
        text = escape_html(&task.text),
        options = day_options(Some(task.day)),
    )
}

fn day_options(selected: Option<DayOfWeek>) -> String {
    DayOfWeek::ALL
        .iter()
        .map(|day| {
            let mark = if Some(*day) == selected { " selected" } else { "" };
            format!(r#"<option value="{day}"{mark}>{day}</option>"#)
        })
        .collect()
}

fn disabled(allowed: bool) -> &'static str {
    if allowed { "" } else { "disabled" }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CELEBRATION_HTML: &str = r#"<div class="celebrate" role="status">Nice work!</div>
  <script>setTimeout(() => location.reload(), 3000);</script>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weekly To Do</title>
  <style>
    :root {
      --bg: #f8f3e6;
      --ink: #2b2a28;
      --card: #ffffff;
      --accent: #ff6b4a;
      --muted: #8b857d;
    }

    body.dark {
      --bg: #1d2128;
      --ink: #ece8e1;
      --card: #2a2f38;
      --muted: #a59f96;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px;
    }

    header, .nav, .progress, form.add {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      margin-bottom: 16px;
    }

    h1 {
      margin: 0;
      flex: 1;
    }

    .range {
      color: var(--muted);
    }

    .week {
      display: grid;
      grid-template-columns: repeat(7, minmax(140px, 1fr));
      gap: 10px;
    }

    .day {
      background: var(--card);
      border-radius: 12px;
      padding: 10px;
    }

    .day.today {
      outline: 2px solid var(--accent);
    }

    .day h2 {
      font-size: 0.95rem;
      margin: 0 0 8px;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    .task {
      display: grid;
      gap: 4px;
      padding: 6px 0;
      border-top: 1px solid rgba(0, 0, 0, 0.08);
    }

    .task.completed .text {
      text-decoration: line-through;
      color: var(--muted);
    }

    .time {
      font-size: 0.8rem;
      color: var(--muted);
    }

    form.inline {
      display: inline;
    }

    .bar {
      width: 160px;
      height: 10px;
      background: rgba(0, 0, 0, 0.1);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .celebrate {
      position: fixed;
      top: 20px;
      right: 20px;
      background: var(--accent);
      color: white;
      padding: 12px 18px;
      border-radius: 999px;
      animation: fade 3s ease forwards;
    }

    @keyframes fade {
      from { opacity: 1; }
      to { opacity: 0; }
    }
  </style>
</head>
<body class="{{THEME}}">
  {{CELEBRATION}}
  <header>
    <h1>Weekly To Do</h1>
    <form method="post" action="/theme/toggle"><button type="submit">Toggle theme</button></form>
  </header>

  <div class="nav">
    <form method="post" action="/week/prev"><button type="submit" {{PREV_DISABLED}}>&larr;</button></form>
    <form method="post" action="/week/today"><button type="submit">Today</button></form>
    <form method="post" action="/week/next"><button type="submit" {{NEXT_DISABLED}}>&rarr;</button></form>
    <span class="range">{{RANGE}}</span>
  </div>

  <form class="add" method="post" action="/tasks">
    <select name="day">{{DAY_OPTIONS}}</select>
    <input name="text" placeholder="Enter your task" autofocus />
    <input name="time" type="time" />
    <label><input type="checkbox" name="repeat" /> Repeat daily</label>
    <button type="submit">Add Task</button>
  </form>

  <div class="progress">
    <label>Daily progress</label><div class="bar"><span style="width: {{DAILY}}%"></span></div>
    <label>Weekly progress</label><div class="bar"><span style="width: {{WEEKLY}}%"></span></div>
  </div>

  <main class="week">{{COLUMNS}}</main>
</body>
</html>
"#;
