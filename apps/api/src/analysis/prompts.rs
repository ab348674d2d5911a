// Analysis LLM prompt templates.
// Placeholders in braces are substituted by the builders in service.rs.

pub const MATCH_SCORE_PROMPT: &str = r#"Analyze this resume against the job description and provide a match score.

JOB TITLE: {job_title}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Respond ONLY with valid JSON (no markdown, no extra text):
{
  "match_score": <integer 1-10>,
  "reasoning": "<detailed explanation>",
  "summary": "<brief one-line assessment>",
  "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
  "gaps": ["<gap 1>", "<gap 2>", "<gap 3>"]
}"#;

pub const MISSING_KEYWORDS_PROMPT: &str = r#"Find the top {max_keywords} most important keywords from the job description that are MISSING from the resume.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Respond ONLY with a JSON array of strings (no markdown, no extra text):
["keyword1", "keyword2", ...]

Focus on: technical skills, tools, certifications, required competencies."#;

pub const REWRITE_EXPERIENCE_PROMPT: &str = r#"Rewrite this experience section using achievement-based formatting.

ORIGINAL EXPERIENCE:
{experience_text}

TARGET JOB DESCRIPTION:
{job_description}

KEYWORDS TO INTEGRATE: {keywords}

Rules:
- Use formula: "Achieved [result] by [action] resulting in [impact]"
- Add 2-3 quantified achievements per role (use % or numbers)
- Integrate keywords naturally
- Use strong action verbs
- Keep company names, dates, and job titles intact

Write ONLY the rewritten experience section, no extra commentary:"#;
