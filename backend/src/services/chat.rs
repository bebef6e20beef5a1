//! Farming chat assistant
//! Forwards questions to the language model, answers from canned guides
//! when it is unavailable

use serde::{Deserialize, Serialize};
use shared::Language;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::chat::ChatMessage;
use crate::external::ChatClient;
use crate::services::DataSource;

const SYSTEM_PROMPT: &str = "You are an expert agricultural assistant specializing in Indian farming practices. \
You help farmers and agricultural professionals with comprehensive farming advice.

Your expertise includes:
- Crop Selection
- Soil Management
- Seasonal Planning (Kharif, Rabi, Zaid)
- Water Management
- Pest & Disease Control
- Fertilizers and NPK ratios
- Market Intelligence
- Weather Considerations
- Modern Techniques
- Government Schemes

Be practical, scientific and farmer-friendly. Use Indian context.";

const SOIL_GUIDE: &str = "🌍 **Soil Information:**

**Clay Soil:** Good for rice, wheat, sugarcane. Retains water well but needs drainage.

**Sandy Soil:** Suits groundnut, carrots, potatoes. Needs frequent watering and organic matter.

**Loamy Soil:** Ideal for most crops with balanced water retention and drainage.

**Tips:**
- Test soil pH (6.0-7.5 is ideal for most crops)
- Add compost to improve soil structure
- Use cover crops to prevent erosion";

const CROP_GUIDE: &str = "🌱 **Crop Selection Guide:**

**Kharif Season (June-October):**
- Rice, Maize, Cotton, Sugarcane
- Groundnut, Soybean, Bajra

**Rabi Season (October-March):**
- Wheat, Barley, Mustard, Gram
- Potato, Onion, Tomato

**Summer Season (March-June):**
- Cucumber, Okra, Bitter gourd
- Watermelon, Muskmelon

**Consider:**
- Local climate and rainfall
- Soil type and fertility
- Market demand and prices
- Water availability";

const PEST_GUIDE: &str = "🐛 **Pest & Disease Management:**

**Common Pests:**
- Aphids: Use neem oil or soap solution
- Whiteflies: Yellow sticky traps
- Caterpillars: BT (Bacillus thuringiensis)

**Prevention:**
- Crop rotation
- Proper spacing
- Regular monitoring
- Natural predators

**Early Detection:**
- Check leaves daily
- Look for spots, holes or wilting
- Act quickly when problems appear";

const GENERAL_ADVICE: &str = "🌾 **General Agricultural Advice:**

I can help with:
- **Crop Selection** for your season and soil
- **Soil Management** and fertility
- **Pest Control** with natural and organic methods
- **Water Management** and efficient irrigation
- **Market Prices** and pricing trends
- **Weather Planning** for the season

**Quick Tips:**
- Always test your soil before planting
- Practice crop rotation to maintain soil health
- Use organic fertilizers when possible
- Monitor weather forecasts regularly";

const OFFLINE_NOTE: &str =
    "\n\n*This is general advice. Personalized answers are available once the assistant is connected.*";

/// Chat assistant service
#[derive(Clone)]
pub struct ChatService {
    client: Option<ChatClient>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub source: DataSource,
}

impl ChatService {
    pub fn new(client: Option<ChatClient>) -> Self {
        Self { client }
    }

    pub async fn reply(&self, request: ChatRequest) -> AppResult<ChatReply> {
        request.validate()?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::Validation {
                field: "message".to_string(),
                message: "Message must not be blank".to_string(),
                message_hi: "संदेश खाली नहीं हो सकता".to_string(),
            });
        }

        let Some(client) = &self.client else {
            tracing::debug!("No chat API key configured, answering from local guides");
            return Ok(offline_reply(message));
        };

        let messages = vec![
            ChatMessage::system(system_prompt(request.language)),
            ChatMessage::user(message),
        ];

        match client.complete(messages).await {
            Ok(reply) => Ok(ChatReply {
                reply,
                source: DataSource::Live,
            }),
            Err(e) => {
                tracing::warn!("Chat completion failed, answering from local guides: {}", e);
                Ok(offline_reply(message))
            }
        }
    }
}

/// System prompt with the reply-language instruction appended
pub fn system_prompt(language: Language) -> String {
    let instruction = match language {
        Language::English => "Reply in simple English.",
        Language::Hindi => "Reply in Hindi using Devanagari script.",
        Language::Telugu => "Reply in Telugu using Telugu script.",
    };
    format!("{}\n\n{}", SYSTEM_PROMPT, instruction)
}

/// Pick a canned guide by keyword
pub fn fallback_response(message: &str) -> &'static str {
    let message = message.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| message.contains(w));

    if mentions(&["soil", "clay", "sandy"]) {
        SOIL_GUIDE
    } else if mentions(&["crop", "plant", "grow"]) {
        CROP_GUIDE
    } else if mentions(&["pest", "disease", "insect"]) {
        PEST_GUIDE
    } else {
        GENERAL_ADVICE
    }
}

fn offline_reply(message: &str) -> ChatReply {
    ChatReply {
        reply: format!("{}{}", fallback_response(message), OFFLINE_NOTE),
        source: DataSource::Fallback,
    }
}
