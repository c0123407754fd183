//! Prompt construction for defense questions

/// Instruction asking for committee questions about the uploaded presentation
pub fn build_question_prompt(max_questions: u32) -> String {
    format!(
        "Задай вопросы, которые могут возникнуть у комиссии по этой презентации. \
         Важно, чтобы вопросы были на русском языке. Максимум {max_questions} вопросов, \
         соблюдай максимум по вопросам."
    )
}
