use std::fmt::Write as _;

use course_core::model::{Mistake, SummaryStyle};

pub(crate) fn quiz(text: &str, count: usize, language: &str) -> String {
    format!(
        "Based on the following text, generate a quiz with {count} questions in {language}.
Return the result strictly as a JSON array of objects.
Each object must have:
- \"question\": string (in {language})
- \"options\": array of exactly 4 strings (in {language})
- \"correctAnswerIndex\": number (0-3)

Text:
{text}

Output JSON only, no markdown formatting."
    )
}

pub(crate) fn summary(content: &str, language: &str) -> String {
    format!(
        "Write an engaging, friendly summary of the following course content in {language}.

Make learning exciting:
- conversational tone, address the student directly
- relevant emojis to illustrate concepts
- simple analogies and short, punchy sentences
- catchy section titles

Format strictly as Markdown:
- clear titles with emojis (## 🎯 Title)
- bullet lists for clarity
- **bold** for key concepts, *italics* for important nuances

Do not wrap the output in a code block. Return only the Markdown content.

Course content:
{content}"
    )
}

pub(crate) fn styled_summary(content: &str, style: SummaryStyle, language: &str) -> String {
    match style {
        SummaryStyle::Shrink => format!(
            "Rewrite the following content so that it is 70% SHORTER while keeping the essential information.
The result MUST be in {language}.

Strict rules:
1. Aim for about 30% of the original length
2. Keep ONLY the key points and essential concepts
3. Use very short, direct sentences
4. Drop detailed examples and long explanations
5. Use bullet lists for concision
6. Format strictly as Markdown with short titles (## Title)

Content to shrink:
{content}"
        ),
        SummaryStyle::CheatSheet => format!(
            "Turn the following content into a fun, high-energy revision cheat sheet in {language}.

Required style:
1. Friendly, motivating tone, address the student directly
2. Plenty of relevant emojis
3. Simple everyday analogies
4. Short, punchy sentences
5. Memorable mnemonics
6. Catchy titles with emojis

Required structure:
- ## 🎯 The Essentials (3-4 key points max)
- ## 💡 Must Remember (critical points)
- ## ⚡ Pro Tips (practical advice)
- ## 🎓 To Shine (bonus and advanced points)

Format strictly as Markdown.

Content:
{content}"
        ),
    }
}

pub(crate) fn explain_mistakes(mistakes: &[Mistake], context: &str, language: &str) -> String {
    let mut listed = String::new();
    for (i, mistake) in mistakes.iter().enumerate() {
        let _ = write!(
            listed,
            "\nQuestion {n}: {question}\nYour answer: {answer}\nCorrect answer: {correct}\n",
            n = i + 1,
            question = mistake.question,
            answer = mistake.user_answer.as_deref().unwrap_or("(no answer)"),
            correct = mistake.correct_answer,
        );
    }

    format!(
        "You are a patient tutor helping a student understand their mistakes.

Here are the mistakes the student made in a quiz:
{listed}
Course context:
{context}

Instructions:
1. For each mistake, explain WHY the correct answer is right
2. Explain WHY the student's answer was wrong
3. Give advice to better understand the concept
4. Use an encouraging, teaching tone
5. Answer in {language}
6. Use Markdown formatting and a few emojis

Format your answer with a clear title for each mistake, concise explanations and practical tips."
    )
}
