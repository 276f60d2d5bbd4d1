//! Built-in seed catalog.
//!
//! The engine treats the catalog as an externally supplied immutable
//! list; this module is the default provider. Search results can replace
//! it wholesale (same `Article` shape) via the feed service.

use crate::article::Article;

/// The 18-article seed set. IDs are stable strings; tests and the
/// curation job rely on them.
pub fn seed_articles() -> Vec<Article> {
    vec![
        Article::new(
            "1",
            "Biophilic Skyscraper Redefines Urban Living in Singapore",
            "A new residential tower in Singapore integrates lush vertical gardens and natural materials, aiming to reconnect city dwellers with nature.",
            "ArchDaily",
            "Singapore",
        )
        .with_images(&[
            ("https://picsum.photos/id/1018/1080/1920", "https://picsum.photos/id/1018/20/35"),
            ("https://picsum.photos/id/1025/1080/1920", "https://picsum.photos/id/1025/20/35"),
        ])
        .with_influences(&["Sustainability", "Biophilic Design"])
        .with_keywords(&["green architecture", "urban jungle", "sustainable living"]),
        Article::new(
            "2",
            "Parametric Design Transforms a Museum Façade in Dubai",
            "Using computational algorithms, architects have created a stunning, wave-like façade for Dubai's new Museum of the Future.",
            "Dezeen",
            "UAE",
        )
        .with_images(&[("https://picsum.photos/id/103/1080/1920", "https://picsum.photos/id/103/20/35")])
        .with_influences(&["Technology", "Innovation"])
        .with_keywords(&["parametricism", "computational design", "futurism"]),
        Article::new(
            "3",
            "Minimalist Japanese \"Micro-Home\" Maximizes Small Space",
            "In Tokyo, a tiny house on a challenging plot of land showcases clever storage solutions and minimalist aesthetics to create a comfortable living space.",
            "Design Boom",
            "Japan",
        )
        .with_images(&[("https://picsum.photos/id/1043/1080/1920", "https://picsum.photos/id/1043/20/35")])
        .with_influences(&["Minimalism", "Urbanism"])
        .with_keywords(&["tiny house", "small-space living", "Japanese design"]),
        Article::new(
            "4",
            "3D-Printed Community Rises in Rural Mexico",
            "A partnership between non-profits has resulted in the world's first 3D-printed neighborhood, providing resilient and affordable housing.",
            "Reuters",
            "Mexico",
        )
        .with_images(&[
            ("https://picsum.photos/id/1047/1080/1920", "https://picsum.photos/id/1047/20/35"),
            ("https://picsum.photos/id/1048/1080/1920", "https://picsum.photos/id/1048/20/35"),
        ])
        .with_influences(&["Technology", "Social Impact"])
        .with_keywords(&["3d printing", "affordable housing", "construction tech"]),
        Article::new(
            "5",
            "Copenhagen's New Power Plant Doubles as a Ski Slope",
            "CopenHill, a waste-to-energy plant, features a public ski slope on its roof, blending industrial infrastructure with public recreation.",
            "The Guardian",
            "Denmark",
        )
        .with_images(&[("https://picsum.photos/id/1060/1080/1920", "https://picsum.photos/id/1060/20/35")])
        .with_influences(&["Sustainability", "Urbanism"])
        .with_keywords(&["public space", "renewable energy", "innovative infrastructure"]),
        Article::new(
            "6",
            "The Rise of \"Digital Nomad\" Visas and Their Impact on Global Cities",
            "Countries are increasingly offering special visas for remote workers, transforming tourism and housing markets in cities like Lisbon and Bali.",
            "Wired",
            "Global",
        )
        .with_images(&[("https://picsum.photos/id/1062/1080/1920", "https://picsum.photos/id/1062/20/35")])
        .with_influences(&["Global Culture", "Technology"])
        .with_keywords(&["remote work", "digital nomad", "globalization"]),
        Article::new(
            "7",
            "Generative AI Creates \"Impossible\" Architectural Concepts",
            "Artists and designers are using text-to-image AI models to visualize fantastical buildings and cities that defy the laws of physics.",
            "Creative Bloq",
            "N/A",
        )
        .with_images(&[("https://picsum.photos/id/1074/1080/1920", "https://picsum.photos/id/1074/20/35")])
        .with_influences(&["Innovation", "Technology"])
        .with_keywords(&["generative art", "ai in design", "conceptual architecture"]),
        Article::new(
            "8",
            "Revitalizing Brutalism: London's Barbican Centre Gets a Facelift",
            "A sensitive restoration project aims to preserve the iconic Brutalist architecture of the Barbican while updating its facilities for the 21st century.",
            "Wallpaper*",
            "UK",
        )
        .with_images(&[("https://picsum.photos/id/1084/1080/1920", "https://picsum.photos/id/1084/20/35")])
        .with_influences(&["Heritage", "Brutalism"])
        .with_keywords(&["architectural preservation", "brutalist architecture", "concrete"]),
        Article::new(
            "9",
            "Seoul's \"Smart City\" Infrastructure Aims for Zero Emissions",
            "The city of Seoul is investing heavily in IoT sensors, AI-powered traffic management, and renewable energy to create a sustainable urban future.",
            "Bloomberg",
            "South Korea",
        )
        .with_images(&[("https://picsum.photos/id/111/1080/1920", "https://picsum.photos/id/111/20/35")])
        .with_influences(&["Technology", "Sustainability"])
        .with_keywords(&["smart city", "iot", "urban technology"]),
        Article::new(
            "10",
            "The Psychology of Color in Interior Design",
            "Explore how different colors impact mood and perception in living spaces, with expert tips on creating specific atmospheres.",
            "Architectural Digest",
            "N/A",
        )
        .with_images(&[("https://picsum.photos/id/116/1080/1920", "https://picsum.photos/id/116/20/35")])
        .with_influences(&["Interior Design", "Wellbeing"])
        .with_keywords(&["color theory", "psychology", "home decor"]),
        Article::new(
            "11",
            "Floating Architecture: A Solution for Rising Sea Levels?",
            "Designers in the Netherlands are pioneering amphibious and floating homes as a proactive response to climate change and coastal flooding.",
            "BBC Future",
            "Netherlands",
        )
        .with_images(&[("https://picsum.photos/id/124/1080/1920", "https://picsum.photos/id/124/20/35")])
        .with_influences(&["Sustainability", "Innovation"])
        .with_keywords(&["climate adaptation", "floating homes", "resilient design"]),
        Article::new(
            "12",
            "The Timeless Allure of Mid-Century Modern Design",
            "Why do the clean lines, organic forms, and functional aesthetics of the 1950s and 60s continue to dominate contemporary design trends?",
            "Dwell",
            "USA",
        )
        .with_images(&[("https://picsum.photos/id/145/1080/1920", "https://picsum.photos/id/145/20/35")])
        .with_influences(&["Interior Design", "Heritage"])
        .with_keywords(&["mid-century modern", "eames", "design history"]),
        Article::new(
            "13",
            "Mass Timber Construction Reaches New Heights",
            "A new 25-story tower built from cross-laminated timber (CLT) in Vancouver demonstrates the potential of wood as a sustainable alternative to steel and concrete.",
            "Journal of Commerce",
            "Canada",
        )
        .with_images(&[("https://picsum.photos/id/160/1080/1920", "https://picsum.photos/id/160/20/35")])
        .with_influences(&["Sustainability", "Technology"])
        .with_keywords(&["mass timber", "clt", "sustainable construction"]),
        Article::new(
            "14",
            "NFTs and the Virtual Real Estate Boom",
            "Investors are spending millions on digital land in metaverses like Decentraland and The Sandbox, hiring virtual architects to design their properties.",
            "Forbes",
            "Global",
        )
        .with_images(&[("https://picsum.photos/id/163/1080/1920", "https://picsum.photos/id/163/20/35")])
        .with_influences(&["Technology", "Innovation"])
        .with_keywords(&["metaverse", "nft", "virtual architecture"]),
        Article::new(
            "15",
            "How Ancient Roman Concrete Has Lasted for Millennia",
            "Scientists have finally unlocked the secrets of self-healing Roman concrete, which could lead to more durable modern construction materials.",
            "National Geographic",
            "Italy",
        )
        .with_images(&[("https://picsum.photos/id/180/1080/1920", "https://picsum.photos/id/180/20/35")])
        .with_influences(&["Heritage", "Technology"])
        .with_keywords(&["roman architecture", "materials science", "ancient technology"]),
        Article::new(
            "16",
            "The Philosophy of Wabi-Sabi in Japanese Aesthetics",
            "Embracing imperfection, impermanence, and authenticity, the Japanese concept of wabi-sabi offers a profound alternative to Western beauty standards.",
            "T: The NYTimes Style Magazine",
            "Japan",
        )
        .with_images(&[("https://picsum.photos/id/200/1080/1920", "https://picsum.photos/id/200/20/35")])
        .with_influences(&["Global Culture", "Minimalism"])
        .with_keywords(&["wabi-sabi", "japanese philosophy", "aesthetics"]),
        Article::new(
            "17",
            "Kinetic Façades: Buildings That Move and Adapt",
            "Dynamic building skins that respond to sunlight, wind, and temperature are creating more energy-efficient and visually stunning architecture.",
            "Architizer",
            "Global",
        )
        .with_images(&[("https://picsum.photos/id/211/1080/1920", "https://picsum.photos/id/211/20/35")])
        .with_influences(&["Technology", "Sustainability"])
        .with_keywords(&["kinetic architecture", "smart materials", "responsive design"]),
        Article::new(
            "18",
            "Designing for Neurodiversity: Creating Inclusive Spaces",
            "Architects are now considering sensory sensitivities and cognitive differences to design schools, workplaces, and public spaces that are welcoming to everyone.",
            "Metropolis",
            "Global",
        )
        .with_images(&[("https://picsum.photos/id/219/1080/1920", "https://picsum.photos/id/219/20/35")])
        .with_influences(&["Social Impact", "Wellbeing"])
        .with_keywords(&["inclusive design", "neurodiversity", "universal design"]),
    ]
}
