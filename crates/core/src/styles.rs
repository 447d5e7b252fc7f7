//! House style tokens handed to the model as inline CSS snippets.

use serde_json::{json, Value};

/// The base style tokens, keyed by element role.
///
/// Serialised verbatim into generation prompts; the model is told to use only these.
pub fn house_style() -> Value {
    json!({
        "container": "max-width: 1200px; margin: 0 auto; padding: 2rem; background: #fafafa;",
        "section": "padding: 6rem 2rem; background: linear-gradient(to bottom right, #ffffff, #f8fafc);",
        "grid": "display: grid; gap: 2.5rem; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));",
        "title": "font-size: 3.5rem; font-weight: 800; color: #1e293b; margin-bottom: 1.5rem; line-height: 1.1;",
        "subtitle": "font-size: 2rem; font-weight: 700; color: #334155; margin-bottom: 1rem; letter-spacing: -0.025em;",
        "text": "font-size: 1.125rem; color: #64748b; line-height: 1.8; font-weight: 400;",
        "button": {
            "primary": "padding: 1rem 2rem; background: linear-gradient(to right, #3b82f6, #2563eb); color: white; border-radius: 12px; font-weight: 600; cursor: pointer; transition: all 0.3s ease;",
            "secondary": "padding: 1rem 2rem; background: rgba(255,255,255,0.8); color: #1e293b; border: 2px solid #e2e8f0; border-radius: 12px; font-weight: 600; transition: all 0.3s ease;",
            "outline": "padding: 1rem 2rem; background: transparent; color: #3b82f6; border: 2px solid #3b82f6; border-radius: 12px; font-weight: 600; transition: all 0.3s ease;"
        },
        "card": {
            "default": "background: white; border-radius: 16px; padding: 2rem; box-shadow: 0 20px 25px -5px rgba(0, 0, 0, 0.05), 0 10px 10px -5px rgba(0, 0, 0, 0.02);",
            "glass": "background: rgba(255, 255, 255, 0.7); backdrop-filter: blur(10px); border-radius: 16px; padding: 2rem; border: 1px solid rgba(255, 255, 255, 0.2);",
            "gradient": "background: linear-gradient(135deg, #ffffff 0%, #f8fafc 100%); border-radius: 16px; padding: 2rem;"
        },
        "link": "color: #3b82f6; text-decoration: none; font-weight: 500; transition: all 0.2s ease;",
        "grid2": "display: grid; grid-template-columns: repeat(2, 1fr); gap: 2.5rem;",
        "grid3": "display: grid; grid-template-columns: repeat(3, 1fr); gap: 2.5rem;",
        "grid4": "display: grid; grid-template-columns: repeat(4, 1fr); gap: 2.5rem;",
        "flex": "display: flex; gap: 2rem; align-items: center; flex-wrap: wrap;",
        "effects": {
            "glassmorphism": "background: rgba(255, 255, 255, 0.7); backdrop-filter: blur(10px); border: 1px solid rgba(255, 255, 255, 0.2);",
            "gradient": "background: linear-gradient(135deg, #3b82f6 0%, #2563eb 100%);",
            "shadowLg": "box-shadow: 0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 10px 10px -5px rgba(0, 0, 0, 0.04);"
        }
    })
}
