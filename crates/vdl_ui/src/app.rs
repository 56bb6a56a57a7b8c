//! Application state, messages and view.
//!
//! All behaviour lives in [`Session`]; this module maps widget messages onto
//! session transitions and renders whatever phase the session is in.

use std::path::PathBuf;

use iced::widget::{button, column, container, progress_bar, row, scrollable, stack, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};

use vdl_core::config::{ConfigManager, Settings};
use vdl_core::fetch::{ClipFetcher, FetchError};
use vdl_core::models::ClipId;
use vdl_core::orchestrator::{RunAction, RunEvent};
use vdl_core::session::{Phase, Session};

use crate::theme::{colors, font, spacing};
use crate::widgets::{completion_dialog, text_input_with_paste};

/// Messages produced by widgets and background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    UrlChanged(String),
    PasteUrl,
    UrlPasted(Option<String>),
    ClipFetched(u64, Result<ClipId, FetchError>),
    OutputNameChanged(String),
    BrowseOutputDir,
    OutputDirPicked(Option<PathBuf>),
    Start(RunAction),
    Run(RunEvent),
    Restart,
    Exit,
}

/// Top-level iced state.
pub struct App {
    pub(crate) session: Session,
    pub(crate) config: ConfigManager,
    pub(crate) fetcher: Result<ClipFetcher, FetchError>,
}

impl App {
    pub fn new(config_path: PathBuf, settings: Settings) -> (Self, Task<Message>) {
        let mut config = ConfigManager::new(config_path);
        *config.settings_mut() = settings.clone();

        let fetcher = ClipFetcher::from_settings(&settings.network);
        if let Err(e) = &fetcher {
            tracing::error!("Clip lookups unavailable: {}", e);
        }

        let app = Self {
            session: Session::new(settings),
            config,
            fetcher,
        };
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        String::from("Vimeo DL")
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => self.handle_url_changed(url),
            Message::PasteUrl => self.paste_url(),
            Message::UrlPasted(Some(url)) => self.handle_url_changed(url.trim().to_string()),
            Message::UrlPasted(None) => Task::none(),
            Message::ClipFetched(generation, result) => {
                self.handle_clip_fetched(generation, result);
                Task::none()
            }
            Message::OutputNameChanged(name) => {
                self.session.set_output_name(name);
                Task::none()
            }
            Message::BrowseOutputDir => self.browse_output_dir(),
            Message::OutputDirPicked(dir) => {
                self.handle_output_dir_picked(dir);
                Task::none()
            }
            Message::Start(action) => self.handle_start(action),
            Message::Run(event) => {
                self.handle_run_event(event);
                Task::none()
            }
            Message::Restart => {
                tracing::info!("Starting over");
                self.session.restart();
                Task::none()
            }
            Message::Exit => iced::exit(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let session = &self.session;
        let editable = session.phase().accepts_input();

        let url_input = text_input_with_paste(
            "Vimeo clip URL",
            session.url(),
            editable.then_some(Message::UrlChanged as fn(String) -> Message),
            editable.then_some(Message::PasteUrl),
        );

        let name_input = text_input("Output name (e.g. lecture)", session.output_name())
            .on_input_maybe(editable.then_some(Message::OutputNameChanged as fn(String) -> Message))
            .width(Length::Fill);

        let dir_label = match session.output_dir() {
            Some(dir) => format!("Save to: {}", dir.display()),
            None => format!("Save to: {}", session.work_dir().display()),
        };
        let dir_row = row![
            container(text(dir_label).size(font::NORMAL).color(colors::TEXT_SECONDARY))
                .width(Length::Fill),
            button(text("Choose folder").size(font::NORMAL))
                .on_press_maybe(editable.then_some(Message::BrowseOutputDir))
                .padding([spacing::XS, spacing::MD]),
        ]
        .spacing(spacing::SM)
        .align_y(Alignment::Center);

        let actions = row![
            button(text("Download").size(font::MD))
                .on_press_maybe(session.can_download().then_some(Message::Start(RunAction::Download)))
                .padding([spacing::SM, spacing::LG]),
            button(text("Combine").size(font::MD))
                .on_press_maybe(session.can_combine().then_some(Message::Start(RunAction::Combine)))
                .padding([spacing::SM, spacing::LG]),
        ]
        .spacing(spacing::SM);

        let mut content = column![
            text("Vimeo DL").size(font::HEADER),
            url_input,
            name_input,
            dir_row,
            actions,
        ]
        .spacing(spacing::MD)
        .padding(spacing::LG);

        if matches!(session.phase(), Phase::Running { .. } | Phase::Completed { .. }) {
            content = content.push(progress_bar(0.0..=100.0, session.progress() as f32));
        }

        if !session.status().is_empty() {
            content = content.push(text(session.status()).size(font::NORMAL));
        }

        if let Some(error) = session.error() {
            content = content.push(
                text(format!("Error: {}", error))
                    .size(font::NORMAL)
                    .color(colors::ERROR_TEXT),
            );
        }

        content = content.push(log_panel(session));

        let base = container(content).width(Length::Fill).height(Length::Fill);

        match session.report() {
            Some(report) => stack![base, completion_dialog(report)].into(),
            None => base.into(),
        }
    }
}

/// Scrolling view of the current run's log lines.
fn log_panel(session: &Session) -> Element<'_, Message> {
    let lines = column(
        session
            .log_lines()
            .map(|line| text(line).size(font::SM).color(colors::TEXT_MUTED).into()),
    )
    .spacing(2);

    container(scrollable(lines).height(Length::Fill).width(Length::Fill))
        .padding(spacing::SM)
        .style(|_theme: &Theme| container::Style {
            background: Some(colors::CARD.into()),
            border: iced::Border {
                color: colors::BORDER,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        })
        .height(Length::Fill)
        .width(Length::Fill)
        .into()
}
