//! Simulated posts, used when no upstream provider answers.

use super::models::RawPost;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

const SPORTS: &[&str] = &["cricket", "football", "hockey", "kabaddi", "badminton"];
const TEAMS: &[&str] = &[
    "Team India",
    "Mumbai Indians",
    "Chennai Kings",
    "Delhi Capitals",
    "Bengaluru FC",
];
const PLAYERS: &[&str] = &["Virat", "Rohit", "Dhoni", "Hardik", "KL Rahul", "Jadeja"];
const COLLEGES: &[&str] = &[
    "Delhi University",
    "IIT Bombay",
    "AIIMS",
    "St. Stephen's",
    "Lady Shri Ram",
    "Miranda House",
];
const DEPARTMENTS: &[&str] = &["Engineering", "Arts", "Science", "Commerce", "Medical", "Law"];
const STATES: &[&str] = &["UP", "Maharashtra", "Delhi", "Karnataka", "Gujarat", "Punjab"];
const CITIES: &[&str] = &["Mumbai", "Delhi", "Bangalore", "Kolkata", "Chennai", "Hyderabad"];
const MINISTERS: &[&str] = &["Home Minister", "Education Minister", "PM", "Finance Minister"];
const POLICIES: &[&str] = &["education", "healthcare", "infrastructure", "economy", "technology"];
const TOPICS: &[&str] = &["digital india", "smart cities", "startup india", "clean energy"];
const FESTIVALS: &[&str] = &["Diwali", "Holi", "Durga Puja", "Ganesh Chaturthi"];
const MONUMENTS: &[&str] = &["Taj Mahal", "Red Fort", "India Gate", "Gateway of India"];
const EVENTS: &[&str] = &["Republic Day", "Independence Day", "Unity Day"];

const TEMPLATES: &[&str] = &[
    // sports
    "Just watched an incredible {sport} match! {team} vs {opponent} was epic 🏆",
    "What a game by {player}! {score} points in tonight's match 🌟",
    "{team} making history with their performance this season 🔥",
    // college
    "First day at {college}! Can't wait to start this new journey 🎓",
    "Campus life at {college} is incredible. Making memories every day 📚",
    "Finals week at {college}. Time to pull those all-nighters ✍️",
    "Proud to be part of {college}'s {department} department! #CollegeLife",
    "{college} में नया सेमेस्टर शुरू! नई उम्मीदें 🎓",
    "कॉलेज का आखिरी साल {college} में। यादें हमेशा रहेंगी 💫",
    "{college} के फेस्ट में आज धमाल! #CollegeFest",
    // politics
    "Important discussion in Parliament today about {policy} #IndianPolitics",
    "Election results in {state} showing interesting trends! #Elections2025",
    "New policy announcement by {minister} regarding {topic} #GovtPolicy",
    "{state} में नई सरकार की बड़ी घोषणा! #Politics",
    "{minister} ने {topic} पर दिया बड़ा बयान #IndianPolitics",
    "चुनाव प्रचार में {leader} का जोरदार भाषण #Elections",
    // general
    "Celebrating the spirit of India at {festival} 🪔",
    "Amazing street food tour in {city}! Nothing beats Indian cuisine 😋",
    "Beautiful sunset at {monument} today 🌅 #IncredibleIndia",
    "आज का दिन {city} में बहुत खास रहा 💫",
    "{festival} की हार्दिक शुभकामनाएं 🪔",
    "भारत की विविधता में एकता का उत्सव {event} 🇮🇳",
];

fn pool(placeholder: &str) -> Option<&'static [&'static str]> {
    let pool = match placeholder {
        "sport" => SPORTS,
        "team" | "opponent" => TEAMS,
        "player" => PLAYERS,
        "college" => COLLEGES,
        "department" => DEPARTMENTS,
        "state" => STATES,
        "city" => CITIES,
        "minister" | "leader" => MINISTERS,
        "policy" => POLICIES,
        "topic" => TOPICS,
        "festival" => FESTIVALS,
        "monument" => MONUMENTS,
        "event" => EVENTS,
        _ => return None,
    };
    Some(pool)
}

/// Fills post templates from word pools.
///
/// Holds no RNG of its own: callers pass one in, so a seeded RNG gives
/// reproducible posts.
#[derive(Clone, Debug)]
pub struct PostGenerator {
    templates: Vec<&'static str>,
}

impl Default for PostGenerator {
    fn default() -> Self {
        Self {
            templates: TEMPLATES.to_vec(),
        }
    }
}

impl PostGenerator {
    /// One post text from a random template.
    pub fn post_text<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.templates.choose(rng) {
            Some(template) => fill_template(template, rng),
            None => String::new(),
        }
    }

    /// `count` posts, the i-th dated `i` days before `now`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<RawPost> {
        let millis = now.timestamp_millis();
        (0..count)
            .map(|i| RawPost {
                id: format!("sim-{}-{}", i, millis),
                content: self.post_text(rng),
                date: (now - Duration::days(i as i64))
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            })
            .collect()
    }
}

/// Replaces every `{name}` with a random word from its pool. Unknown
/// placeholders are kept verbatim.
fn fill_template<R: Rng + ?Sized>(template: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        if name == "score" {
            out.push_str(&rng.random_range(0..200).to_string());
        } else if let Some(word) = pool(name).and_then(|p| p.choose(rng)) {
            out.push_str(word);
        } else {
            out.push_str(&rest[start..start + end + 2]);
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}
