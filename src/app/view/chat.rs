use super::super::messages::Message;
use super::super::state::App;
use iced::alignment::Vertical;
use iced::widget::{
    Column, button, column, container, horizontal_space, row, scrollable, text, text_input,
};
use iced::{Element, Length};

impl App {
    pub(super) fn chat_view(&self) -> Element<'_, Message> {
        row![
            self.chat_sidebar(),
            container(self.conversation_pane()).width(Length::FillPortion(3)),
        ]
        .spacing(16)
        .height(Length::Fill)
        .into()
    }

    fn chat_sidebar(&self) -> Element<'_, Message> {
        let mut sidebar: Column<'_, Message> =
            column![button("New Chat").on_press(Message::StartNewChat)].spacing(6);

        for (chat_id, title) in self.chat.sorted_index() {
            let open = if *chat_id == self.chat.chat_id {
                button(text(title.clone()))
            } else {
                button(text(title.clone())).on_press(Message::OpenChat(chat_id.clone()))
            };
            sidebar = sidebar.push(
                row![
                    open,
                    horizontal_space(),
                    button("x").on_press(Message::DeleteChat(chat_id.clone())),
                ]
                .spacing(4)
                .align_y(Vertical::Center),
            );
        }

        container(scrollable(sidebar).height(Length::Fill))
            .width(Length::Fixed(220.0))
            .padding(8)
            .into()
    }

    fn conversation_pane(&self) -> Element<'_, Message> {
        let mut transcript: Column<'_, Message> = column![].spacing(10);
        // The system prompt stays out of the transcript.
        for message in self.chat.messages.iter().filter(|m| m.role != "system") {
            let speaker = if message.role == "user" { "You" } else { "Buddy" };
            transcript = transcript.push(
                column![
                    text(speaker).size(13.0),
                    text(message.content.clone()),
                ]
                .spacing(2),
            );
        }
        if self.chat.sending {
            transcript = transcript.push(text("Buddy is thinking..."));
        }

        let input_row = row![
            text_input("Ask anything", &self.chat.input)
                .on_input(Message::ChatInputChanged)
                .on_submit(Message::SendChatMessage)
                .width(Length::Fill),
            if self.chat.sending {
                button("Send")
            } else {
                button("Send").on_press(Message::SendChatMessage)
            },
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let mut pane = column![
            text(self.chat.title.clone()).size(18.0),
            scrollable(transcript).height(Length::Fill),
        ]
        .spacing(10)
        .height(Length::Fill);

        if let Some(error) = &self.chat.error {
            pane = pane.push(text(format!("Request failed: {error}")));
        }

        pane.push(input_row).into()
    }
}
