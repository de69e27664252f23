use serde::Serialize;

use crate::community::models::Post;

/// Destinations offered before anyone has posted about them, with their flags.
const DEFAULT_COUNTRIES: [(&str, &str); 8] = [
    ("일본", "🇯🇵"),
    ("중국", "🇨🇳"),
    ("태국", "🇹🇭"),
    ("베트남", "🇻🇳"),
    ("프랑스", "🇫🇷"),
    ("영국", "🇬🇧"),
    ("미국", "🇺🇸"),
    ("호주", "🇦🇺"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub name: String,
    pub flag: Option<&'static str>,
}

pub fn flag_for(country: &str) -> Option<&'static str> {
    DEFAULT_COUNTRIES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, flag)| *flag)
}

/// Defaults first, then every other country found in posts, without duplicates.
pub fn country_options(posts: &[Post]) -> Vec<CountryOption> {
    let mut options: Vec<CountryOption> = DEFAULT_COUNTRIES
        .iter()
        .map(|(name, flag)| CountryOption {
            name: name.to_string(),
            flag: Some(flag),
        })
        .collect();

    for post in posts {
        let country = post.country.trim();
        if country.is_empty() || options.iter().any(|o| o.name == country) {
            continue;
        }
        options.push(CountryOption {
            name: country.to_string(),
            flag: flag_for(country),
        });
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::models::Author;
    use chrono::Utc;

    fn post_in(country: &str) -> Post {
        Post {
            id: country.to_string(),
            title: String::new(),
            content: String::new(),
            author: Author::default(),
            country: country.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            likes: Default::default(),
            comments: Vec::new(),
            views: 0,
        }
    }

    #[test]
    fn test_defaults_come_first() {
        let options = country_options(&[]);
        assert_eq!(options.len(), DEFAULT_COUNTRIES.len());
        assert_eq!(options[0].name, "일본");
        assert_eq!(options[0].flag, Some("🇯🇵"));
    }

    #[test]
    fn test_post_countries_appended_once() {
        let posts = vec![post_in("스페인"), post_in("일본"), post_in("스페인"), post_in("")];
        let options = country_options(&posts);
        assert_eq!(options.len(), DEFAULT_COUNTRIES.len() + 1);
        let last = options.last().unwrap();
        assert_eq!(last.name, "스페인");
        assert_eq!(last.flag, None);
    }
}
