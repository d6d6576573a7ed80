//! Static content for the demo apps.

use crate::components::{FileEntry, FileKind, ListEntry, Note};
use crate::playback::Track;

const ARTIST: &str = "You";

pub fn demo_tracks() -> Vec<Track> {
    [
        ("Late Night Drive", "Demos Vol. 1", 222),
        ("Sunrise Memories", "Demos Vol. 1", 255),
        ("City Lights", "Demos Vol. 1", 238),
        ("Echoes", "Demos Vol. 1", 302),
        ("Fading Away", "Demos Vol. 2", 270),
        ("New Beginnings", "Demos Vol. 2", 202),
        ("Daydream", "Demos Vol. 2", 285),
        ("Midnight Blues", "Demos Vol. 2", 318),
    ]
    .into_iter()
    .map(|(title, album, secs)| Track::new(title, ARTIST, album, secs))
    .collect()
}

pub fn initial_notes() -> Vec<Note> {
    vec![
        Note::new(
            "Where Have I Been ?",
            "I took some time to really develop my skills and work on executing on a bigger level.\n\n\
             My next album is gonna be 100% produced by myself but until then here are some new \
             demos and ideas I've been working on.\n\nBest,\n\n12/07/2025",
        ),
        Note::new(
            "Admin Notes",
            "This is prelaunch version 0.1 of the website, new updates will be taking place.\n\n\
             For now thanks for visiting.",
        ),
    ]
}

pub fn finder_files() -> Vec<FileEntry> {
    use FileKind::*;
    [
        ("2greedy.png", Image, Some("2.4 MB"), "Dec 1, 2024"),
        ("Cardigan.png", Image, Some("1.8 MB"), "Nov 28, 2024"),
        ("cumngo.jpg", Image, Some("3.2 MB"), "Nov 25, 2024"),
        ("Luna Character Design Sheet.png", Image, Some("5.1 MB"), "Nov 20, 2024"),
        ("Vampire artwork.png", Image, Some("4.3 MB"), "Nov 15, 2024"),
        ("2 greedy.mp3", Audio, Some("4.2 MB"), "Dec 5, 2024"),
        ("cardigan. 08 23 25 3.mp3", Audio, Some("5.8 MB"), "Dec 3, 2024"),
        ("cumngo 3.mp3", Audio, Some("6.1 MB"), "Nov 30, 2024"),
        ("vampire v3.2.mp3", Audio, Some("5.5 MB"), "Nov 22, 2024"),
        ("Documents", Folder, None, "Nov 10, 2024"),
        ("Projects", Folder, None, "Oct 15, 2024"),
        ("Notes.txt", Document, Some("12 KB"), "Dec 8, 2024"),
        ("Ideas.pdf", Document, Some("245 KB"), "Dec 6, 2024"),
        ("Screenshots", Folder, None, "Nov 5, 2024"),
    ]
    .into_iter()
    .map(|(name, kind, size, date)| FileEntry::new(name, kind, size, date))
    .collect()
}

pub fn blog_entries() -> Vec<ListEntry> {
    vec![
        ListEntry::new("imma popstar in da bits", "Dec 07, 2025"),
        ListEntry::new("The Deep - Who", "Dec 07, 2025"),
    ]
}

pub fn newsletter_perks() -> Vec<String> {
    [
        "Weekly updates on new releases",
        "Exclusive behind-the-scenes content",
        "Early access to new tracks",
        "Special offers and announcements",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn about_entries() -> Vec<ListEntry> {
    vec![
        ListEntry::new("Processor", "Apple M1"),
        ListEntry::new("Memory", "16 GB"),
        ListEntry::new("Graphics", "Apple M1"),
        ListEntry::new("Serial Number", "C02XK0XXXXXX"),
    ]
}
