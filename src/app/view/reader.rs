use super::super::messages::Message;
use super::super::state::{App, ReaderSession};
use crate::bridge::{DocumentKind, span_key};
use crate::highlights::{Annotation, Mode, PALETTE, PaletteColor};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, row, scrollable, text, text_input,
};
use iced::{Color, Element, Length};

impl App {
    pub(super) fn reader_view(&self) -> Element<'_, Message> {
        let Some(session) = self.reader.session.as_ref() else {
            return self.open_document_view();
        };

        let toolbar = self.reader_toolbar(session);
        let mode_bar = mode_bar(session.mode);

        let content: Element<'_, Message> = match session.document.kind {
            DocumentKind::Epub => self.epub_pane(session),
            DocumentKind::Pdf => pdf_pane(session),
        };

        let layout = row![
            container(content).width(Length::FillPortion(3)),
            marker_sidebar(session),
        ]
        .spacing(16)
        .height(Length::Fill);

        let mut pane: Column<'_, Message> = column![toolbar, mode_bar].spacing(10);
        if session.confirm_clear {
            pane = pane.push(confirm_clear_bar());
        }
        pane.push(layout).spacing(10).height(Length::Fill).into()
    }

    fn open_document_view(&self) -> Element<'_, Message> {
        let open_row = row![
            text_input("Path to an .epub or .pdf file", &self.reader.open_path_input)
                .on_input(Message::OpenPathInputChanged)
                .on_submit(Message::OpenPathRequested)
                .width(Length::Fill),
            if self.reader.loading {
                button("Opening...")
            } else {
                button("Open").on_press(Message::OpenPathRequested)
            },
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let mut pane = column![text("Open a document").size(18.0), open_row].spacing(12);
        if let Some(error) = &self.reader.load_error {
            pane = pane.push(text(error.clone()));
        }
        container(pane).width(Length::Fill).padding(24).into()
    }

    fn reader_toolbar<'a>(&'a self, session: &'a ReaderSession) -> Row<'a, Message> {
        let page_label = match session.navigator.page_count() {
            Some(count) => format!("Page {} of {}", session.navigator.page() + 1, count.max(1)),
            None => format!("Page {} of ?", session.navigator.page() + 1),
        };

        let prev_button = if session.navigator.page() > 0 {
            button("Previous").on_press(Message::PreviousPage)
        } else {
            button("Previous")
        };
        let at_end = session
            .navigator
            .page_count()
            .is_some_and(|count| session.navigator.page() + 1 >= count.max(1));
        let next_button = if at_end {
            button("Next")
        } else {
            button("Next").on_press(Message::NextPage)
        };

        let undo_button = if session.history.can_undo() {
            button("Undo").on_press(Message::Undo)
        } else {
            button("Undo")
        };
        let redo_button = if session.history.can_redo() {
            button("Redo").on_press(Message::Redo)
        } else {
            button("Redo")
        };
        let clear_button = if session.history.is_empty() {
            button("Clear All")
        } else {
            button("Clear All").on_press(Message::RequestClearHighlights)
        };

        let page_jump = text_input("Go to", &session.page_input)
            .on_input(Message::PageInputChanged)
            .on_submit(Message::PageJumpRequested)
            .width(Length::Fixed(70.0));

        let mut toolbar = row![
            text(session.document.title.clone()).size(16.0),
            prev_button,
            next_button,
            text(page_label),
            page_jump,
            undo_button,
            redo_button,
            clear_button,
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        if session.document.kind == DocumentKind::Pdf {
            toolbar = toolbar
                .push(button("Zoom -").on_press(Message::ZoomOut))
                .push(text(format!("{:.0}%", session.navigator.scale() * 100.0)))
                .push(button("Zoom +").on_press(Message::ZoomIn))
                .push(button("Rotate").on_press(Message::RotateClockwise));
        } else {
            toolbar = toolbar
                .push(button("A-").on_press(Message::ZoomOut))
                .push(text(format!("{}pt", self.config.font_size)))
                .push(button("A+").on_press(Message::ZoomIn));
        }

        toolbar.push(horizontal_space()).push(
            button("Close").on_press(Message::CloseDocument),
        )
    }

    /// The reflowable content pane. The whole page is rebuilt from the
    /// highlight snapshot on every call; markers are never diffed.
    fn epub_pane<'a>(&'a self, session: &'a ReaderSession) -> Element<'a, Message> {
        let location = session.navigator.page();
        let paragraphs = session
            .document
            .locations
            .get(location)
            .map(|l| l.paragraphs.as_slice())
            .unwrap_or_default();

        let spans: Vec<iced::widget::text::Span<'_, Message>> = paragraphs
            .iter()
            .enumerate()
            .flat_map(|(idx, paragraph)| {
                let key = span_key(location, idx);
                let mut span: iced::widget::text::Span<'_, Message> =
                    iced::widget::text::Span::new(paragraph.as_str())
                        .size(self.config.font_size as f32)
                        .line_height(LineHeight::Relative(1.3))
                        .link(Message::SpanClicked(key.clone()));
                if let Some(annotation) = session.history.find(&key) {
                    span = span
                        .background(iced::Background::Color(marker_color(&annotation.color)))
                        .padding(iced::Padding::from(2u16));
                }
                [span, iced::widget::text::Span::new("\n\n")]
            })
            .collect();

        let rich: iced::widget::text::Rich<'_, Message> =
            iced::widget::text::Rich::with_spans(spans);

        scrollable(
            container(
                rich.width(Length::Fill)
                    .wrapping(Wrapping::WordOrGlyph)
                    .align_x(Horizontal::Left),
            )
            .width(Length::Fill)
            .padding(16),
        )
        .height(Length::Fill)
        .into()
    }
}

/// Placeholder chrome for fixed-layout documents; the page image itself
/// comes from an external renderer.
fn pdf_pane(session: &ReaderSession) -> Element<'_, Message> {
    let details = column![
        text(format!("Page {}", session.navigator.page() + 1)).size(24.0),
        text(format!(
            "Scale {:.0}%  ·  Rotation {}°",
            session.navigator.scale() * 100.0,
            session.navigator.rotation()
        )),
        text("Page content is drawn by the PDF renderer."),
    ]
    .spacing(8);

    container(details)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .into()
}

fn mode_bar(active: Mode) -> Element<'static, Message> {
    let mut bar: Row<'static, Message> = row![mode_button("Select", Mode::Select, active)]
        .spacing(6)
        .align_y(Vertical::Center);
    for color in PALETTE {
        bar = bar.push(mode_button(color.label(), Mode::Highlight(color), active));
    }
    bar = bar.push(mode_button("Erase", Mode::Erase, active));
    bar = bar.push(text(mode_label(active)));
    bar.into()
}

fn mode_button(label: &str, mode: Mode, active: Mode) -> Element<'_, Message> {
    if mode == active {
        button(text(label)).into()
    } else {
        button(text(label)).on_press(Message::ModeSelected(mode)).into()
    }
}

fn mode_label(mode: Mode) -> String {
    match mode {
        Mode::Select => "Mode: Select".to_string(),
        Mode::Highlight(color) => format!("Mode: Highlight ({})", color.label()),
        Mode::Erase => "Mode: Erase".to_string(),
    }
}

fn confirm_clear_bar() -> Element<'static, Message> {
    row![
        text("Remove all highlights? This can still be undone."),
        button("Clear").on_press(Message::ConfirmClearHighlights),
        button("Cancel").on_press(Message::CancelClearHighlights),
    ]
    .spacing(10)
    .align_y(Vertical::Center)
    .into()
}

/// The marker sidebar lists every live highlight; clicking one while in
/// erase mode removes it.
fn marker_sidebar(session: &ReaderSession) -> Element<'_, Message> {
    let mut markers: Column<'_, Message> =
        column![text(format!("Highlights ({})", session.history.snapshot().len())).size(16.0)]
            .spacing(6);

    for annotation in session.history.snapshot() {
        markers = markers.push(marker_row(annotation));
    }

    container(scrollable(markers).height(Length::Fill))
        .width(Length::Fixed(220.0))
        .padding(8)
        .into()
}

fn marker_row(annotation: &Annotation) -> Element<'_, Message> {
    let swatch = container(text(" "))
        .width(Length::Fixed(14.0))
        .height(Length::Fixed(14.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(marker_color(&annotation.color))),
            ..container::Style::default()
        });

    row![
        swatch,
        text(annotation.range_key.clone()),
        horizontal_space(),
        button("x").on_press(Message::MarkerClicked(annotation.clone())),
    ]
    .spacing(6)
    .align_y(Vertical::Center)
    .into()
}

/// Translucent background color for a stored marker color string.
fn marker_color(color: &str) -> Color {
    let base = match color {
        c if c == PaletteColor::Chartreuse.css() => Color::from_rgb8(0x9d, 0xff, 0x00),
        "green" => Color::from_rgb8(0x00, 0x80, 0x00),
        "blue" => Color::from_rgb8(0x00, 0x66, 0xcc),
        "red" => Color::from_rgb8(0xcc, 0x22, 0x22),
        "magenta" => Color::from_rgb8(0xcc, 0x00, 0xcc),
        _ => Color::from_rgb8(0x9d, 0xff, 0x00),
    };
    Color { a: 0.45, ..base }
}
