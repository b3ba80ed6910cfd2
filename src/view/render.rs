//! Terminal Renderer
//!
//! Maps the view model onto plain text. All methods are pure so the output
//! can be asserted on directly.

use super::state::{AuthTab, ChatMessage, ChatView, MessageRole, Panel, Region, ViewState};
use crate::zodiac::{Fortune, ZodiacTable};

const METER_WIDTH: usize = 20;
const USER_AVATAR: &str = "👤";
const ORACLE_AVATAR: &str = "🔮";

#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Whatever the view state currently shows
    pub fn render(&self, state: &ViewState, table: &ZodiacTable) -> String {
        if state.is_visible(Region::AuthSection) {
            return self.render_auth(state);
        }

        let mut out = String::new();
        if let Some(greeting) = &state.greeting {
            out.push_str(greeting);
            out.push_str("\n\n");
        }

        match state.panel {
            Panel::ZodiacSelection => out.push_str(&self.render_selection(table)),
            Panel::FortuneDisplay => match &state.fortune {
                Some(fortune) => out.push_str(&self.render_fortune(fortune)),
                None => out.push_str(&self.render_selection(table)),
            },
            Panel::Chat => out.push_str(&self.render_chat(&state.chat)),
        }
        out
    }

    pub fn render_auth(&self, state: &ViewState) -> String {
        let (title, error) = match state.auth_tab {
            AuthTab::Login => ("Login", &state.login_error),
            AuthTab::Register => ("Register", &state.register_error),
        };

        let mut out = format!("== {} ==\n", title);
        if let Some(error) = error {
            out.push_str(&format!("! {}\n", error));
        }
        out
    }

    /// Grid of sign cards, three per row
    pub fn render_selection(&self, table: &ZodiacTable) -> String {
        let cards: Vec<String> = table
            .signs()
            .map(|e| format!("{} {:<12} {:<6}", e.icon, e.name, e.element))
            .collect();

        let mut out = String::from("Choose your sign:\n");
        for row in cards.chunks(3) {
            out.push_str("  ");
            out.push_str(&row.join("   "));
            out.push('\n');
        }
        out
    }

    pub fn render_fortune(&self, fortune: &Fortune) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}  {} ({})\n", fortune.icon, fortune.name, fortune.element));
        out.push_str(&format!("{}\n\n", fortune.date));

        out.push_str("Daily Fortune\n");
        out.push_str(&format!("  {}\n\n", fortune.fortune));

        out.push_str("Energy\n");
        for (label, value) in fortune.energy.labelled() {
            out.push_str(&format!("  {:<8} {} {:>3}%\n", label, meter(value), value));
        }
        out.push('\n');

        let numbers: Vec<String> = fortune.lucky_numbers.iter().map(|n| n.to_string()).collect();
        out.push_str(&format!("Lucky Numbers  {}\n", numbers.join("  ")));
        out.push_str(&format!("Lucky Color    {} ({})\n\n", fortune.lucky_color, fortune.color_swatch()));

        out.push_str("Compatibility\n");
        out.push_str(&format!("  {}\n\n", fortune.compatibility_text()));

        out.push_str("Advice\n");
        out.push_str(&format!("  {}\n", fortune.advice));
        out
    }

    pub fn render_message(&self, message: &ChatMessage) -> String {
        match message.role {
            MessageRole::Error => format!("! {}\n", message.paragraphs.join(" ")),
            role => {
                let avatar = if role == MessageRole::User {
                    USER_AVATAR
                } else {
                    ORACLE_AVATAR
                };
                let mut out = String::new();
                for (i, paragraph) in message.paragraphs.iter().enumerate() {
                    let lead = if i == 0 { avatar } else { "  " };
                    out.push_str(&format!("{} {}\n", lead, paragraph));
                }
                out
            }
        }
    }

    pub fn render_typing(&self) -> String {
        format!("{} ...\n", ORACLE_AVATAR)
    }

    pub fn render_chat(&self, chat: &ChatView) -> String {
        let mut out: String = chat.messages.iter().map(|m| self.render_message(m)).collect();
        if chat.typing {
            out.push_str(&self.render_typing());
        }
        out
    }
}

/// Filled bar proportional to a percentage
fn meter(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) * METER_WIDTH + 50) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(METER_WIDTH - filled))
}
