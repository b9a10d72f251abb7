use super::super::messages::Message;
use super::super::state::App;
use crate::timers::{StudyTimer, format_hms};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, row, scrollable, text, text_input,
};
use iced::{Element, Length};
use std::time::Instant;

impl App {
    pub(super) fn timers_view(&self) -> Element<'_, Message> {
        let mut pane: Column<'_, Message> = column![].spacing(12).height(Length::Fill);

        if let Some(notice) = &self.timers.notice {
            pane = pane.push(
                row![
                    text(notice.clone()).size(18.0),
                    horizontal_space(),
                    button("Dismiss").on_press(Message::DismissTimerNotice),
                ]
                .spacing(10)
                .align_y(Vertical::Center),
            );
        }

        pane = pane.push(self.timer_form());

        let mut list: Column<'_, Message> = column![].spacing(8);
        for timer in self.timers.bank.timers() {
            list = list.push(timer_row(timer, self.timers.last_tick));
        }
        if self.timers.bank.timers().is_empty() {
            list = list.push(text("No timers yet."));
        }

        pane.push(scrollable(list).height(Length::Fill)).into()
    }

    fn timer_form(&self) -> Element<'_, Message> {
        let digits = self.timers.form.digits();
        let mut digit_row: Row<'_, Message> = row![].spacing(4).align_y(Vertical::Center);
        for (index, digit) in digits.iter().enumerate() {
            if index == 2 || index == 4 {
                digit_row = digit_row.push(text(":").size(24.0));
            }
            digit_row = digit_row.push(digit_column(index, *digit));
        }

        let name_input = text_input("Timer name", &self.timers.form.name)
            .on_input(Message::TimerNameChanged)
            .width(Length::Fixed(200.0));

        let create_button = if self.timers.form.is_zero() || self.timers.bank.is_full() {
            button("Create")
        } else {
            button("Create").on_press(Message::CreateTimer)
        };

        let mut form = column![
            text("New timer (HH:MM:SS)").size(16.0),
            row![digit_row, name_input, create_button]
                .spacing(12)
                .align_y(Vertical::Center),
        ]
        .spacing(8);

        if let Some(error) = &self.timers.form_error {
            form = form.push(text(error.clone()));
        }

        container(form).padding(8).into()
    }
}

fn digit_column(index: usize, digit: u8) -> Element<'static, Message> {
    column![
        button(text("+")).on_press(Message::TimerDigitIncremented(index)),
        text(digit.to_string()).size(24.0),
        button(text("-")).on_press(Message::TimerDigitDecremented(index)),
    ]
    .spacing(2)
    .align_x(Horizontal::Center)
    .into()
}

fn timer_row(timer: &StudyTimer, now: Instant) -> Element<'_, Message> {
    let remaining = format_hms(timer.remaining(now));

    let primary = if timer.is_running() {
        button("Pause").on_press(Message::TogglePauseTimer(timer.id))
    } else if timer.is_paused() {
        button("Resume").on_press(Message::TogglePauseTimer(timer.id))
    } else {
        button("Start").on_press(Message::StartTimer(timer.id))
    };

    row![
        text(timer.name.clone()).width(Length::Fixed(200.0)),
        text(remaining).size(20.0),
        horizontal_space(),
        primary,
        button("Reset").on_press(Message::ResetTimer(timer.id)),
        button("Remove").on_press(Message::RemoveTimer(timer.id)),
    ]
    .spacing(10)
    .align_y(Vertical::Center)
    .into()
}
