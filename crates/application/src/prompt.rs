//! Prompt assembly for the diary assistant
//!
//! Builds the system, chat and summarization prompts sent to the text
//! generation provider. All functions are pure and deterministic.
//!
//! Event timestamps are rendered as provided, never re-zoned: an offset in
//! the input only anchors parsing, the wall-clock time is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use domain::entities::{ChatMessage, EventContext};

const BASE_PROMPT: &str = "あなたは親しみやすい日記アシスタントです。
ユーザーとの会話を通じて、過去の出来事や感情を深掘りし、日記作成を支援してください。
";

const PAST_TENSE_NOTES: &str = "重要な注意事項:
- これらは既に終了した過去の出来事です
- 「これから」「予定」「行く」などの未来形は使わないでください
- 過去形「行った」「参加した」「終わった」などを使ってください
- ユーザーが実際に何をしたか、どう感じたかを深掘りして聞いてください
- 出来事の詳細、その時の感情、学びや気づきなどを引き出し、日記作成に役立つ情報を集めてください
- 自然な会話で、過去の体験を振り返るような質問をしてください";

/// Build the system prompt from calendar-event context
///
/// Renders one line per event, omitting each clause whose source field is
/// empty or absent, then appends the event-count header and the past-tense
/// framing block when any context is present.
#[must_use]
pub fn build_system_prompt(context: &[EventContext]) -> String {
    let mut prompt = BASE_PROMPT.to_string();

    if context.is_empty() {
        return prompt;
    }

    let lines: Vec<String> = context.iter().map(render_event).collect();

    prompt.push_str(&format!(
        "\n\n過去に行った出来事({}件):\n{}\n\n{}",
        context.len(),
        lines.join("\n"),
        PAST_TENSE_NOTES
    ));

    prompt
}

/// Build the full chat prompt: system prompt, optional history transcript,
/// then the trailing turn marker.
#[must_use]
pub fn build_chat_prompt(
    user_message: &str,
    context: &[EventContext],
    history: &[ChatMessage],
) -> String {
    let system_prompt = build_system_prompt(context);

    if history.is_empty() {
        return format!("{system_prompt}\n\nuser: {user_message}\nassistant:");
    }

    let transcript = history
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{system_prompt}\n\n会話履歴:\n{transcript}\n\nuser: {user_message}\nassistant:")
}

/// Build the summarization prompt for diary prose
#[must_use]
pub fn build_summary_prompt(conversation: &str) -> String {
    format!(
        "以下の会話履歴を基に、大人が書く日記のような文章を作成してください。
以下の点に注意してください:

1. 一人称で書く(「私は」「自分は」など)
2. 自然で感情的な表現を使う
3. 出来事の詳細だけでなく、その時の感情や考えも含める
4. 簡潔だが、読み手がその日の様子を理解できる内容にする
5. 堅すぎず、かといって砕けすぎない丁寧な文体
6. 「アシスタントとの会話」「AIとの会話」などの言及は不要で、自然に日記として書く

会話履歴:
{conversation}

日記:"
    )
}

fn render_event(event: &EventContext) -> String {
    let mut line = format!("- {}", field(&event.summary).unwrap_or_default());

    if let Some(description) = field(&event.description) {
        line.push_str(&format!(": {description}"));
    }

    let mut event_date = None;
    if let Some(start) = field(&event.start) {
        let (time_info, date) = render_time_info(start, field(&event.end));
        line.push_str(&time_info);
        event_date = date;
    }

    if let Some(location) = field(&event.location) {
        line.push_str(&format!(" [場所: {location}]"));
    }

    if let Some(date) = event_date {
        line.push_str(&format!(" [日付: {}]", date.format("%Y年%m月%d日")));
    }

    line
}

fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Derive the parenthesized time clause and the event date from the raw
/// start/end strings. An unparsable timestamp falls back to the raw start
/// string verbatim, never an error.
fn render_time_info(start: &str, end: Option<&str>) -> (String, Option<NaiveDate>) {
    let Some(start_dt) = parse_timestamp(start) else {
        return (format!(" ({start})"), None);
    };

    let event_date = Some(start_dt.date());

    let Some(end) = end else {
        return (format!(" ({})", start_dt.format("%H:%M")), event_date);
    };

    let Some(end_dt) = parse_timestamp(end) else {
        return (format!(" ({start})"), event_date);
    };

    let time_info = if start_dt.date() == end_dt.date() {
        if is_all_day(&start_dt, &end_dt) {
            " (終日)".to_string()
        } else {
            format!(
                " ({} - {})",
                start_dt.format("%H:%M"),
                end_dt.format("%H:%M")
            )
        }
    } else {
        format!(
            " ({} - {})",
            start_dt.format("%m/%d %H:%M"),
            end_dt.format("%m/%d %H:%M")
        )
    };

    (time_info, event_date)
}

fn is_all_day(start: &NaiveDateTime, end: &NaiveDateTime) -> bool {
    start.hour() == 0 && start.minute() == 0 && end.hour() == 23 && end.minute() == 59
}

/// Parse an ISO-8601 timestamp, with or without an offset. Offsets are kept
/// as wall-clock time rather than converted.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    value.parse::<NaiveDateTime>().ok()
}
