#[cfg(test)]
mod tests {
    use crate::parsing::course_text::decompose;

    fn cell(fragments: &[&str]) -> Vec<String> {
        fragments.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_subject_with_parenthesised_teacher() {
        let text = decompose(&cell(&["Algorithmique (ABC)"]), "Inconnu");
        assert_eq!(text.subject, "Algorithmique");
        assert_eq!(text.teacher, "ABC");
        assert_eq!(text.location, "");
    }

    #[test]
    fn test_two_teachers() {
        let text = decompose(&cell(&["Projet tutoré (AB/CDE)", "B2-101"]), "Inconnu");
        assert_eq!(text.subject, "Projet tutoré");
        assert_eq!(text.teacher, "AB/CDE");
        assert_eq!(text.location, "B2-101");
    }

    #[test]
    fn test_dash_teacher_suffix() {
        let text = decompose(&cell(&["Réseaux - XY"]), "Inconnu");
        assert_eq!(text.subject, "Réseaux");
        assert_eq!(text.teacher, "XY");
    }

    #[test]
    fn test_no_teacher_suffix() {
        let text = decompose(&cell(&["Anglais"]), "Inconnu");
        assert_eq!(text.subject, "Anglais");
        assert_eq!(text.teacher, "");
    }

    #[test]
    fn test_second_fragment_is_teacher() {
        let text = decompose(&cell(&["TP Système", "DEF", "U3-205"]), "Inconnu");
        assert_eq!(text.subject, "TP Système");
        assert_eq!(text.teacher, "DEF");
        assert_eq!(text.location, "U3-205");
    }

    #[test]
    fn test_only_location_gives_unknown_subject() {
        let text = decompose(&cell(&["Amphi A"]), "Inconnu");
        assert_eq!(text.subject, "Inconnu");
        assert_eq!(text.teacher, "");
        assert_eq!(text.location, "Amphi A");
    }

    #[test]
    fn test_empty_cell_uses_configured_marker() {
        let text = decompose(&[], "Unknown");
        assert_eq!(text.subject, "Unknown");
    }

    #[test]
    fn test_location_inside_a_line_is_stripped() {
        let text = decompose(&cell(&["Maths sur Zoom", "GHI"]), "Inconnu");
        assert_eq!(text.location, "Maths sur Zoom");
        assert_eq!(text.subject, "GHI");

        let text = decompose(&cell(&["Cours 1A-12"]), "Inconnu");
        assert_eq!(text.location, "1A-12");
        assert_eq!(text.subject, "Cours");
    }

    #[test]
    fn test_multiple_locations_are_joined() {
        let text = decompose(&cell(&["Soutenance", "A1-001", "A1-002"]), "Inconnu");
        assert_eq!(text.location, "A1-001A1-002");
        assert_eq!(text.subject, "Soutenance");
    }
}
