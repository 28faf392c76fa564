//! Prompt text sent to the model

use shared::AdviceMode;

const FORECAST_ROLE: &str = "\
You are an Operations Director presenting a forecast to the CEO.
Format your response using Markdown.
Structure it into 3 distinct sections with bold headers:
1. **📉 Executive Summary**: One sentence summary of the outlook.
2. **⚠️ Operational Risk Analysis**: Compare the prediction vs historical max. Is it too high (capacity risk) or too low (revenue risk)?
3. **🚀 Strategic Action Plan**: Provide 2-3 specific, actionable bullet points for the manager.";

const ANALYTICS_ROLE: &str = "You are a Business Analyst. Summarize the yearly performance, \
highlight the biggest win, and suggest one improvement area. Use bold headers and bullet points.";

/// System message for an advice request
pub fn system_role(mode: AdviceMode) -> &'static str {
    match mode {
        AdviceMode::Forecast => FORECAST_ROLE,
        AdviceMode::Analytics => ANALYTICS_ROLE,
    }
}

/// Single user message asking for the ten order fields as JSON
pub fn extraction_prompt(text: &str) -> String {
    format!(
        "Extract catering order details into JSON.
Fields:
- Date (YYYY-MM-DD)
- Customer_Name (Person's Name)
- Phone_Number (digits only)
- Order_Title (Event Name)
- Pax (Integer)
- Staff_Count (Integer, default 0)
- Event_Type (Wedding, Corporate, Packet, Buffet, Other)
- Location (City/Area)
- Menu_Items (List of food items)
- Total_Price (Float, total contract value)

Text: \"{}\"
Return ONLY valid JSON.",
        text
    )
}
