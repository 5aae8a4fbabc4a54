//! Prompt assembly for the review model.
//!
//! The user message embeds the MR title, description and per-file diff
//! blocks; diff text is budgeted so the request stays within the model's
//! context window.

use gitlab_context::FileDiff;

use crate::project_type::ProjectType;

/// Upper bound on diff characters included in one prompt.
pub const MAX_DIFF_CHARS: usize = 50_000;

/// System prompt naming the coding standard and the expected JSON shape.
pub fn build_system_prompt(coding_standard: &str) -> String {
    format!(
        "You are a professional code review assistant. Review the code against {coding_standard}.\n\
         Keep every suggestion short, clear and direct; do not hedge.\n\
         Focus on:\n\
         1. Code style and convention issues\n\
         2. Potential logic errors\n\
         3. Violations of best practices\n\
         \n\
         Return the review result as JSON in the following format:\n\
         {{\n\
           \"summary\": \"overall assessment\",\n\
           \"issues\": [\n\
             {{\n\
               \"type\": \"style|logic|best-practice\",\n\
               \"severity\": \"high|medium|low\",\n\
               \"file\": \"path of the affected file\",\n\
               \"message\": \"problem description\",\n\
               \"suggestion\": \"improvement suggestion (optional)\"\n\
             }}\n\
           ],\n\
           \"recommendations\": [\"overall recommendation 1\", \"overall recommendation 2\"]\n\
         }}"
    )
}

/// User message with MR info and as many diff blocks as fit the budget.
pub fn build_user_message(
    title: &str,
    description: &str,
    project_type: ProjectType,
    changes: &[FileDiff],
) -> String {
    let mut msg = format!("Please review the following merge request:\n\nTitle: {title}\n");
    if !description.is_empty() {
        msg.push_str(&format!("Description: {description}\n"));
    }
    msg.push_str(&format!(
        "Project type: {project_type}\n\nCode changes:\n"
    ));

    push_diff_blocks(&mut msg, changes, MAX_DIFF_CHARS);
    msg
}

/// Appends per-file diff blocks to `out` until `budget` characters of block
/// text have been used. Returns how many files made it in; when files are
/// dropped a trailing note says how many.
fn push_diff_blocks(out: &mut String, changes: &[FileDiff], budget: usize) -> usize {
    let mut used = 0usize;
    let mut included = 0usize;

    for change in changes {
        let origin = if change.new_file {
            "(new file)".to_string()
        } else if change.deleted_file {
            "(deleted file)".to_string()
        } else if change.renamed_file {
            format!("(renamed from {})", change.old_path)
        } else {
            String::new()
        };

        let block = format!(
            "\nFile: {}\n{}\n\n```diff\n{}\n```\n",
            change.new_path, origin, change.diff
        );

        if used + block.len() > budget {
            out.push_str(&format!(
                "\n... ({} more files omitted, size limit reached)",
                changes.len() - included
            ));
            break;
        }

        out.push_str(&block);
        used += block.len();
        included += 1;
    }

    included
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(path: &str, body: &str) -> FileDiff {
        FileDiff {
            old_path: path.to_string(),
            new_path: path.to_string(),
            new_file: false,
            renamed_file: false,
            deleted_file: false,
            diff: body.to_string(),
        }
    }

    #[test]
    fn system_prompt_names_standard_and_contract() {
        let prompt = build_system_prompt("the Google Kotlin style guide");
        assert!(prompt.contains("Google Kotlin style guide"));
        assert!(prompt.contains("\"severity\": \"high|medium|low\""));
    }

    #[test]
    fn user_message_skips_empty_description() {
        let msg = build_user_message("Fix crash", "", ProjectType::Unknown, &[]);
        assert!(msg.contains("Title: Fix crash"));
        assert!(!msg.contains("Description:"));
        assert!(msg.contains("Project type: unknown"));
    }

    #[test]
    fn file_origin_markers_are_rendered() {
        let mut renamed = diff("src/new.rs", "+fn f() {}");
        renamed.old_path = "src/old.rs".to_string();
        renamed.renamed_file = true;

        let mut added = diff("src/added.rs", "+fn g() {}");
        added.new_file = true;

        let msg = build_user_message(
            "t",
            "d",
            ProjectType::Unknown,
            &[renamed, added],
        );
        assert!(msg.contains("(renamed from src/old.rs)"));
        assert!(msg.contains("(new file)"));
    }

    #[test]
    fn budget_cuts_off_remaining_files() {
        let changes = vec![
            diff("a.rs", &"+a\n".repeat(30)),
            diff("b.rs", &"+b\n".repeat(30)),
            diff("c.rs", &"+c\n".repeat(30)),
        ];

        let mut out = String::new();
        let included = push_diff_blocks(&mut out, &changes, 150);

        assert!(included < 3);
        assert!(out.contains(&format!("({} more files omitted", 3 - included)));
    }

    #[test]
    fn all_files_fit_without_omission_note() {
        let changes = vec![diff("a.rs", "+a"), diff("b.rs", "+b")];

        let mut out = String::new();
        let included = push_diff_blocks(&mut out, &changes, MAX_DIFF_CHARS);

        assert_eq!(included, 2);
        assert!(!out.contains("omitted"));
    }
}
