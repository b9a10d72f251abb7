mod chat;
mod reader;
mod timers;

use super::messages::{Message, Tool};
use super::state::App;
use iced::Element;
use iced::Length;
use iced::alignment::Vertical;
use iced::widget::{button, column, horizontal_space, row, text};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };

        let top_bar = row![
            text("Study Hub").size(20.0),
            tool_tab("Timers", Tool::Timers, self.active_tool),
            tool_tab("Reader", Tool::Reader, self.active_tool),
            tool_tab("Chat Buddy", Tool::Chat, self.active_tool),
            horizontal_space(),
            button(theme_label).on_press(Message::ToggleTheme),
            button("Quit").on_press(Message::Quit),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        let body = match self.active_tool {
            Tool::Timers => self.timers_view(),
            Tool::Reader => self.reader_view(),
            Tool::Chat => self.chat_view(),
        };

        column![top_bar, body]
            .padding(16)
            .spacing(12)
            .height(Length::Fill)
            .into()
    }
}

fn tool_tab(label: &str, tool: Tool, active: Tool) -> Element<'_, Message> {
    if tool == active {
        button(text(label)).into()
    } else {
        button(text(label)).on_press(Message::SwitchTool(tool)).into()
    }
}
