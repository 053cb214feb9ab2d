use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"\n— {}", self.text, self.author)
    }
}

const fn quote(text: &'static str, author: &'static str) -> Quote {
    Quote { text, author }
}

pub const QUOTES: &[Quote] = &[
    quote("The secret of getting ahead is getting started.", "Mark Twain"),
    quote("It always seems impossible until it's done.", "Nelson Mandela"),
    quote("Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    quote("Success is the sum of small efforts repeated day in and day out.", "Robert Collier"),
    quote("You don't have to be great to start, but you have to start to be great.", "Zig Ziglar"),
    quote("The only way to do great work is to love what you do.", "Steve Jobs"),
    quote("Believe you can and you're halfway there.", "Theodore Roosevelt"),
    quote(
        "Education is the most powerful weapon which you can use to change the world.",
        "Nelson Mandela",
    ),
    quote(
        "The beautiful thing about learning is that nobody can take it away from you.",
        "B.B. King",
    ),
    quote("Strive for progress, not perfection.", "Unknown"),
    quote("A little progress each day adds up to big results.", "Satya Nani"),
    quote("Focus on being productive instead of busy.", "Tim Ferriss"),
    quote("The expert in anything was once a beginner.", "Helen Hayes"),
    quote("Your limitation—it's only your imagination.", "Unknown"),
    quote("Push yourself, because no one else is going to do it for you.", "Unknown"),
    quote("Dream bigger. Do bigger.", "Unknown"),
    quote("Wake up with determination. Go to bed with satisfaction.", "Unknown"),
    quote("Do something today that your future self will thank you for.", "Sean Patrick Flanery"),
    quote("Hard work beats talent when talent doesn't work hard.", "Tim Notke"),
    quote("Study hard, for the well is deep, and our brains are shallow.", "Richard Baxter"),
];

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static Quote {
    QUOTES.choose(rng).unwrap_or(&QUOTES[0])
}
