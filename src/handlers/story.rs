//! Three-word story template

const DEFAULT_ADJECTIVE: &str = "strange";

pub fn build_story(verb: &str, noun: &str, adjective: &str) -> String {
    let adjective = match adjective.trim() {
        "" => DEFAULT_ADJECTIVE,
        word => word,
    };
    format!(
        "Once upon a time, a brave soul decided to {} the {}. Everything turned {}, and they found something unexpected.",
        verb.trim(),
        noun.trim(),
        adjective
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_interpolation() {
        let story = build_story("paint", "castle", "purple");
        assert!(story.contains("decided to paint the castle."));
        assert!(story.contains("Everything turned purple,"));
    }

    #[test]
    fn test_missing_adjective_defaults() {
        let story = build_story("climb", "tower", "  ");
        assert!(story.contains("Everything turned strange,"));
    }
}
