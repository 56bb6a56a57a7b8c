//! Modal shown after a successful merge.

use iced::widget::{button, center, column, container, opaque, row, text};
use iced::{Alignment, Border, Element, Length, Theme};

use vdl_core::orchestrator::RunReport;

use crate::app::Message;
use crate::theme::{colors, font, spacing};

/// Completion dialog overlay: output location, any cleanup warning, and
/// "Start over" / "Exit" buttons.
///
/// Meant to be stacked on top of the main view; the backdrop swallows
/// input to the widgets underneath.
pub fn completion_dialog(report: &RunReport) -> Element<'_, Message> {
    let mut body = column![
        text("Merge complete").size(font::HEADER).color(colors::SUCCESS_TEXT),
        text(format!("Clip {} was saved to:", report.clip)).size(font::NORMAL),
        text(report.output_path.display().to_string()).size(font::MD),
    ]
    .spacing(spacing::SM);

    if let Some(warning) = report.cleanup_warning() {
        body = body.push(
            text(format!("Warning: {}", warning))
                .size(font::NORMAL)
                .color(colors::WARNING_TEXT),
        );
    }

    body = body.push(
        text(format!("Log: {}", report.log_path.display()))
            .size(font::SM)
            .color(colors::TEXT_SECONDARY),
    );

    let buttons = row![
        button(text("Start over").size(font::LG))
            .on_press(Message::Restart)
            .padding([spacing::SM, spacing::LG]),
        button(text("Exit").size(font::LG))
            .on_press(Message::Exit)
            .padding([spacing::SM, spacing::LG]),
    ]
    .spacing(spacing::MD);

    let dialog = container(
        column![body, buttons]
            .spacing(spacing::LG)
            .align_x(Alignment::Center),
    )
    .padding(spacing::XL)
    .max_width(520.0)
    .style(|_theme: &Theme| container::Style {
        background: Some(colors::DIALOG.into()),
        border: Border {
            color: colors::BORDER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    });

    opaque(
        center(dialog)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| container::Style {
                background: Some(colors::BACKDROP.into()),
                ..Default::default()
            }),
    )
}
