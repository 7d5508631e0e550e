//! Voice catalogue for the supported TTS engines.
//!
//! Kokoro v1.0 ships 53 voices across 9 languages, addressed by speaker ID.
//! The VITS models are single-speaker, one per language.

/// Metadata for a Kokoro voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub name: &'static str,
    pub speaker_id: i32,
    pub espeak_code: &'static str,
    pub language: &'static str,
}

impl Voice {
    const fn new(name: &'static str, speaker_id: i32, espeak_code: &'static str, language: &'static str) -> Self {
        Self { name, speaker_id, espeak_code, language }
    }
}

/// Kokoro voices, sorted by name for binary search.
const KOKORO_VOICES: &[Voice] = &[
    Voice::new("af_alloy", 0, "en-us", "American English"),
    Voice::new("af_aoede", 1, "en-us", "American English"),
    Voice::new("af_bella", 2, "en-us", "American English"),
    Voice::new("af_heart", 3, "en-us", "American English"),
    Voice::new("af_jessica", 4, "en-us", "American English"),
    Voice::new("af_kore", 5, "en-us", "American English"),
    Voice::new("af_nicole", 6, "en-us", "American English"),
    Voice::new("af_nova", 7, "en-us", "American English"),
    Voice::new("af_river", 8, "en-us", "American English"),
    Voice::new("af_sarah", 9, "en-us", "American English"),
    Voice::new("af_sky", 10, "en-us", "American English"),
    Voice::new("am_adam", 11, "en-us", "American English"),
    Voice::new("am_echo", 12, "en-us", "American English"),
    Voice::new("am_eric", 13, "en-us", "American English"),
    Voice::new("am_fenrir", 14, "en-us", "American English"),
    Voice::new("am_liam", 15, "en-us", "American English"),
    Voice::new("am_michael", 16, "en-us", "American English"),
    Voice::new("am_onyx", 17, "en-us", "American English"),
    Voice::new("am_puck", 18, "en-us", "American English"),
    Voice::new("am_santa", 19, "en-us", "American English"),
    Voice::new("bf_alice", 20, "en-gb", "British English"),
    Voice::new("bf_emma", 21, "en-gb", "British English"),
    Voice::new("bf_isabella", 22, "en-gb", "British English"),
    Voice::new("bf_lily", 23, "en-gb", "British English"),
    Voice::new("bm_daniel", 24, "en-gb", "British English"),
    Voice::new("bm_fable", 25, "en-gb", "British English"),
    Voice::new("bm_george", 26, "en-gb", "British English"),
    Voice::new("bm_lewis", 27, "en-gb", "British English"),
    Voice::new("ef_dora", 28, "es", "Spanish"),
    Voice::new("em_alex", 29, "es", "Spanish"),
    Voice::new("ff_siwis", 30, "fr-fr", "French"),
    Voice::new("hf_alpha", 31, "hi", "Hindi"),
    Voice::new("hf_beta", 32, "hi", "Hindi"),
    Voice::new("hm_omega", 33, "hi", "Hindi"),
    Voice::new("hm_psi", 34, "hi", "Hindi"),
    Voice::new("if_sara", 35, "it", "Italian"),
    Voice::new("im_nicola", 36, "it", "Italian"),
    Voice::new("jf_alpha", 37, "ja", "Japanese"),
    Voice::new("jf_gongitsune", 38, "ja", "Japanese"),
    Voice::new("jf_nezumi", 39, "ja", "Japanese"),
    Voice::new("jf_tebukuro", 40, "ja", "Japanese"),
    Voice::new("jm_kumo", 41, "ja", "Japanese"),
    Voice::new("pf_dora", 42, "pt-br", "Portuguese BR"),
    Voice::new("pm_alex", 43, "pt-br", "Portuguese BR"),
    Voice::new("pm_santa", 44, "pt-br", "Portuguese BR"),
    Voice::new("zf_xiaobei", 45, "cmn", "Mandarin Chinese"),
    Voice::new("zf_xiaoni", 46, "cmn", "Mandarin Chinese"),
    Voice::new("zf_xiaoxiao", 47, "cmn", "Mandarin Chinese"),
    Voice::new("zf_xiaoyi", 48, "cmn", "Mandarin Chinese"),
    Voice::new("zm_yunjian", 49, "cmn", "Mandarin Chinese"),
    Voice::new("zm_yunxi", 50, "cmn", "Mandarin Chinese"),
    Voice::new("zm_yunxia", 51, "cmn", "Mandarin Chinese"),
    Voice::new("zm_yunyang", 52, "cmn", "Mandarin Chinese"),
];

/// Languages in display order.
const KOKORO_LANGUAGES: &[&str] = &[
    "American English",
    "British English",
    "Spanish",
    "French",
    "Hindi",
    "Italian",
    "Japanese",
    "Portuguese BR",
    "Mandarin Chinese",
];

/// VITS voices: (language code, model bundle, speaker description).
const VITS_VOICES: &[(&str, &str, &str)] = &[
    ("en", "vits-piper-en_US-ljspeech-medium", "LJSpeech (female, American English)"),
    ("de", "vits-piper-de_DE-thorsten-medium", "Thorsten (male, German)"),
];

/// Get Kokoro voice metadata by name.
pub fn get_voice(name: &str) -> Option<&'static Voice> {
    KOKORO_VOICES.binary_search_by_key(&name, |v| v.name).ok().map(|idx| &KOKORO_VOICES[idx])
}

/// Look up a Kokoro voice by name (`bf_emma`) or numeric speaker ID (`21`).
pub fn find_voice(voice: &str) -> Option<&'static Voice> {
    get_voice(voice).or_else(|| {
        let id = voice.parse::<i32>().ok()?;
        KOKORO_VOICES.iter().find(|v| v.speaker_id == id)
    })
}

/// Resolve a Kokoro voice to its speaker ID.
///
/// Accepts a voice name (`bf_emma`) or a raw numeric speaker ID (`21`).
pub fn resolve_speaker_id(voice: &str) -> Option<i32> {
    find_voice(voice).map(|v| v.speaker_id)
}

/// Print all available voices.
pub fn print_voices() {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Kokoro TTS v1.0 - {} Voices Across {} Languages", KOKORO_VOICES.len(), KOKORO_LANGUAGES.len());
    println!("═══════════════════════════════════════════════════════════════════");

    for lang in KOKORO_LANGUAGES {
        let mut voices: Vec<_> = KOKORO_VOICES.iter().filter(|v| v.language == *lang).collect();
        voices.sort_by_key(|v| v.speaker_id);

        println!("\n── {} ({} voices) ──", lang, voices.len());
        println!("{:<15} {:<4} ESPEAK", "VOICE", "ID");
        println!("{}", "─".repeat(50));
        for voice in voices {
            println!("{:<15} {:<4} {}", voice.name, voice.speaker_id, voice.espeak_code);
        }
    }

    println!("\n═══════════════════════════════════════════════════════════════════");
    println!("  VITS - one voice per language (--engine vits --language <code>)");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("{:<6} {:<36} SPEAKER", "LANG", "MODEL");
    println!("{}", "─".repeat(70));
    for (code, bundle, speaker) in VITS_VOICES {
        println!("{:<6} {:<36} {}", code, bundle, speaker);
    }

    println!();
    println!("Usage:");
    println!("  pdf-narrator paper.pdf --voice bf_emma");
    println!("  pdf-narrator paper.pdf --engine vits --language de");
}

/// Print detailed information about a specific Kokoro voice.
pub fn print_voice_info(name: &str) -> anyhow::Result<()> {
    let voice = get_voice(name).ok_or_else(|| anyhow::anyhow!("Voice '{}' not found. Run with --list-voices to see available voices", name))?;

    println!();
    println!("Voice: {}", voice.name);
    println!("{}", "─".repeat(40));
    println!("Speaker ID:    {}", voice.speaker_id);
    println!("Language:      {}", voice.language);
    println!("espeak code:   {}", voice.espeak_code);
    println!();
    println!("Usage:");
    println!("  pdf-narrator paper.pdf --voice {}", voice.name);
    println!();

    Ok(())
}
