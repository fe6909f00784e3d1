//! Prompt templates for the text-generation service

/// System message sent with every generation request
pub const SYSTEM_PROMPT: &str = "You are an experienced writer of motivation and cover letters.";

/// Cover-letter instructions with the candidate's resume and the job description embedded.
///
/// The model is asked for LaTeX paragraphs only: no greeting, no signature,
/// no commentary. The response is written to `body.tex` as-is.
pub fn cover_letter_prompt(resume: &str, job_description: &str) -> String {
    format!(
        "Compose a brief and impactful cover letter based on the provided job description and resume. \
The letter should be no longer than three paragraphs and should be written in a professional, yet conversational tone. \
Avoid using any placeholders, and ensure that the letter flows naturally and is tailored to the job.

Analyze the job description to identify key qualifications and requirements. \
Introduce the candidate succinctly, aligning their career objectives with the role. \
Highlight relevant skills and experiences from the resume that directly match the job's demands, \
using specific examples to illustrate these qualifications. \
Reference notable aspects of the company, such as its mission or values, that resonate with the candidate's professional goals. \
Conclude with a strong statement of why the candidate is a good fit for the position, expressing a desire to discuss further.

Write the cover letter so that it directly addresses the job role and the company's characteristics, \
concise and engaging without unnecessary embellishments. \
The letter should be formatted into paragraphs and should not include a greeting or signature.

## Rules:
- Do not include any introductions, explanations, or additional information.
- Output the cover letter in LaTeX format, and do not include any greeting or signature.

## Details:

- **My resume:**

{resume}

- **Job Description:**

{job_description}
",
        resume = resume.trim(),
        job_description = job_description.trim(),
    )
}

/// HR-style breakdown of the skills and qualifications a posting asks for
pub fn job_summary_prompt(job_description: &str) -> String {
    format!(
        "As a seasoned HR expert, identify and outline the key skills and requirements necessary for this position. \
Use the provided job description as input and extract all relevant information. \
Consider both the technical and soft skills needed to excel in this role, \
and specify any educational qualifications, certifications, or experiences that are essential.

Rules:
- Remove boilerplate text.
- Include only information relevant to matching the job description against a resume.

# Analysis Requirements
Your analysis should include the following sections:
- Technical Skills: the specific technical skills required by the responsibilities described.
- Soft Skills: communication, problem-solving, time management and similar.
- Educational Qualifications and Certifications: what is essential for the role.
- Professional Experience: relevant work experience that is required or preferred.
- Role Evolution: how the role might evolve with industry trends and how that affects the required skills.

# Final Result:
A clear document with a distinct section for each point above.

# Job Description:
{job_description}
",
        job_description = job_description.trim(),
    )
}
