//! The demo applications hosted by the desktop.

pub mod fixtures;

use std::fmt;

use clap::ValueEnum;

use crate::components::{
    AppComponent, FinderComponent, ListComponent, MailComponent, MusicPlayerComponent,
    NotesComponent,
};
use crate::layout::Size;
use crate::playback::{Playback, PlaybackError};
use crate::window::WindowProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum AppKind {
    Music,
    Finder,
    Notes,
    Safari,
    Mail,
    Settings,
}

impl AppKind {
    /// Dock order.
    pub const ALL: [AppKind; 6] = [
        AppKind::Finder,
        AppKind::Safari,
        AppKind::Mail,
        AppKind::Notes,
        AppKind::Music,
        AppKind::Settings,
    ];

    pub const fn profile(self) -> WindowProfile {
        match self {
            AppKind::Music => WindowProfile::new(Size::new(800, 520), Size::new(600, 400), 30),
            AppKind::Finder => WindowProfile::new(Size::new(900, 550), Size::new(600, 400), 20),
            AppKind::Notes => WindowProfile::new(Size::new(800, 600), Size::new(600, 400), 25),
            AppKind::Safari => WindowProfile::new(Size::new(700, 550), Size::new(500, 400), 20),
            AppKind::Mail => WindowProfile::new(Size::new(750, 600), Size::new(600, 500), 20),
            AppKind::Settings => WindowProfile::new(Size::new(900, 550), Size::new(500, 400), 20),
        }
    }

    /// Name shown in the dock and the menu bar.
    pub const fn name(self) -> &'static str {
        match self {
            AppKind::Music => "iTunes",
            AppKind::Finder => "Finder",
            AppKind::Notes => "TextEdit",
            AppKind::Safari => "Safari",
            AppKind::Mail => "Mail",
            AppKind::Settings => "About This Mac",
        }
    }

    pub const fn window_title(self) -> &'static str {
        match self {
            AppKind::Music => "iTunes",
            AppKind::Finder => "Finder - Desktop",
            AppKind::Notes => "TextEdit",
            AppKind::Safari => "Safari - Blog",
            AppKind::Mail => "Mail - Newsletter",
            AppKind::Settings => "About This Mac",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            AppKind::Music => "♫",
            AppKind::Finder => "◧",
            AppKind::Notes => "✎",
            AppKind::Safari => "◎",
            AppKind::Mail => "✉",
            AppKind::Settings => "⚙",
        }
    }

    /// Index of the function key (F1..) that launches this app.
    pub fn launch_index(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or_default()
    }

    pub fn from_launch_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn create_component(self) -> Result<Box<dyn AppComponent>, PlaybackError> {
        let component: Box<dyn AppComponent> = match self {
            AppKind::Music => Box::new(MusicPlayerComponent::new(Playback::new(
                fixtures::demo_tracks(),
            )?)),
            AppKind::Notes => Box::new(NotesComponent::new(fixtures::initial_notes())),
            AppKind::Finder => Box::new(FinderComponent::new(fixtures::finder_files())),
            AppKind::Safari => Box::new(
                ListComponent::new(fixtures::blog_entries())
                    .with_heading(vec!["Blog".into(), "Latest posts".into()]),
            ),
            AppKind::Mail => Box::new(MailComponent::new(fixtures::newsletter_perks())),
            AppKind::Settings => Box::new(
                ListComponent::new(fixtures::about_entries())
                    .with_heading(vec![
                        "macOS".into(),
                        "Ventura".into(),
                        "Version 13.2.1".into(),
                    ])
                    .read_only(),
            ),
        };
        Ok(component)
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
