//! URL field with a paste button.

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Border, Element, Length, Theme};

use crate::app::Message;
use crate::theme::{colors, spacing};

/// Text input with a small paste button to its right.
///
/// Passing `None` for `on_input` / `on_paste` disables the input and the
/// button (used while a run is in progress).
pub fn text_input_with_paste<'a, F>(
    placeholder: &'a str,
    value: &'a str,
    on_input: Option<F>,
    on_paste: Option<Message>,
) -> Element<'a, Message>
where
    F: Fn(String) -> Message + 'a,
{
    let input = text_input(placeholder, value)
        .on_input_maybe(on_input)
        .width(Length::Fill);

    let paste_btn = button(
        container(text("📋").size(14))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press_maybe(on_paste)
    .width(28)
    .height(28)
    .style(|theme: &Theme, status| {
        let palette = theme.palette();
        let background = match status {
            button::Status::Hovered => colors::BUTTON_HOVER,
            button::Status::Pressed => colors::BUTTON_PRESSED,
            _ => colors::BUTTON_BG,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette.text,
            border: Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        }
    });

    row![input, paste_btn]
        .spacing(spacing::XS)
        .align_y(Alignment::Center)
        .into()
}
