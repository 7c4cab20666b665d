//! User-visible text, French and English.

use crate::facts::Language;
use crate::rules::AreaId;
use crate::time::TimeOfDay;
use crate::weather::WeatherLabel;

use Language::{En, Fr};

pub fn weather_advice(label: WeatherLabel, language: Language) -> &'static str {
    match (label, language) {
        (WeatherLabel::HeavyRain, Fr) => "Prévoir un parcours indoor et des alternatives courtes.",
        (WeatherLabel::HeavyRain, En) => "Plan an indoor route with short alternatives.",
        (WeatherLabel::RainRisk, Fr) => "Ayez un plan pluie avec étapes indoor proches.",
        (WeatherLabel::RainRisk, En) => "Keep a rain plan with nearby indoor stops.",
        (WeatherLabel::Heat, Fr) => "Favoriser matin/indoor et points d'eau.",
        (WeatherLabel::Heat, En) => "Favour mornings, indoor stops and water points.",
        (WeatherLabel::Mixed, Fr) => "Alterner indoor/outdoor; prévoir pauses et eau.",
        (WeatherLabel::Mixed, En) => "Alternate indoor and outdoor; plan breaks and water.",
        (WeatherLabel::Windy, Fr) => "Itinéraire abrité recommandé.",
        (WeatherLabel::Windy, En) => "A sheltered route is recommended.",
        (WeatherLabel::Pleasant, Fr) => "Conditions favorables.",
        (WeatherLabel::Pleasant, En) => "Favourable conditions.",
        (WeatherLabel::Unknown, Fr) => "Météo indisponible.",
        (WeatherLabel::Unknown, En) => "Weather unavailable.",
    }
}

/// Weather sentence for the narrative summary; `None` when there is nothing to say.
pub fn weather_line(label: WeatherLabel, language: Language) -> Option<&'static str> {
    let line = match (label, language) {
        (WeatherLabel::HeavyRain, Fr) => "Météo : fortes pluies — parcours principalement indoor et sections courtes.",
        (WeatherLabel::HeavyRain, En) => "Weather: heavy rain — mostly indoor route with short outdoor sections.",
        (WeatherLabel::RainRisk, Fr) => "Météo : risque d'averse — prévoir un plan pluie et des étapes indoor proches.",
        (WeatherLabel::RainRisk, En) => "Weather: risk of showers — keep a rain plan and nearby indoor stops.",
        (WeatherLabel::Heat, Fr) => "Météo : chaleur — privilégier l'indoor, les pauses et les points d'eau.",
        (WeatherLabel::Heat, En) => "Weather: heat — favour indoor stops, breaks and water points.",
        (WeatherLabel::Mixed, Fr) => "Météo : variable — alterner indoor/outdoor avec des marges.",
        (WeatherLabel::Mixed, En) => "Weather: changeable — alternate indoor and outdoor with some slack.",
        (WeatherLabel::Windy, Fr) => "Météo : vent — privilégier des parcours abrités.",
        (WeatherLabel::Windy, En) => "Weather: windy — prefer sheltered paths.",
        (WeatherLabel::Unknown, Fr) => "Météo indisponible — ce parcours ne tient pas compte de la météo.",
        (WeatherLabel::Unknown, En) => "Weather unavailable — this plan assumes no weather constraints.",
        (WeatherLabel::Pleasant, _) => return None,
    };
    Some(line)
}

pub fn intro(language: Language) -> &'static str {
    match language {
        Fr => "Voici un parcours faisable et adapté à votre demande.",
        En => "Here is a feasible route tailored to your request.",
    }
}

pub fn hours_reminder(language: Language) -> &'static str {
    match language {
        Fr => "Rappel : le Trianon ouvre à 12:00, dernières admissions Château/Trianon 17:45. Les Jardins peuvent fermer à 17:30 certains soirs (Grandes Eaux Nocturnes).",
        En => "Reminder: Trianon opens at 12:00, last admission to the Palace and Trianon is 17:45. The Gardens may close at 17:30 on night-fountain evenings.",
    }
}

pub fn closure_day_summary(language: Language) -> &'static str {
    match language {
        Fr => "Le lundi, le Château et le Domaine de Trianon sont fermés. Je vous propose les Jardins et des espaces gratuits adaptés aux familles : Galerie des Carrosses, Galerie des Sculptures et des Moulages.",
        En => "On Mondays the Palace and the Trianon estate are closed. Here are the Gardens and free, family-friendly spaces: the Gallery of Coaches and the Gallery of Sculptures & Mouldings.",
    }
}

pub fn closure_day_warning(language: Language) -> &'static str {
    match language {
        Fr => "Château/Trianon fermés le lundi.",
        En => "Palace and Trianon are closed on Mondays.",
    }
}

pub fn outdoor_pruned_warning(language: Language) -> &'static str {
    match language {
        Fr => "Météo défavorable : jardins raccourcis/remplacés par des étapes indoor.",
        En => "Bad weather: gardens shortened or replaced by indoor stops.",
    }
}

pub fn heat_warning(language: Language) -> &'static str {
    match language {
        Fr => "Chaleur : pensez eau, casquettes, pauses ombragées.",
        En => "Heat: bring water and a hat, take shaded breaks.",
    }
}

pub fn paid_gardens_warning(language: Language) -> &'static str {
    match language {
        Fr => "Quand les Jardins sont payants : 2 entrées maximum et par 2 grilles différentes.",
        En => "When the Gardens are paid: 2 entries maximum, through 2 different gates.",
    }
}

pub fn area_closed_warning(area: AreaId, language: Language) -> String {
    match language {
        Fr => format!("{} fermé ce jour-là.", area.display_name(language)),
        En => format!("{} is closed that day.", area.display_name(language)),
    }
}

pub fn area_skipped_warning(area: AreaId, language: Language) -> String {
    match language {
        Fr => format!(
            "{} : plus assez de temps ou dernière admission dépassée.",
            area.display_name(language)
        ),
        En => format!(
            "{}: not enough time left or past last admission.",
            area.display_name(language)
        ),
    }
}

pub fn rain_plan_alternative(language: Language) -> &'static str {
    match language {
        Fr => "Plan pluie indoor : Galerie des Carrosses, Sculptures & Moulages, Château (si ouvert).",
        En => "Indoor rain plan: Gallery of Coaches, Sculptures & Mouldings, Palace (if open).",
    }
}

pub fn little_train_alternative(language: Language) -> &'static str {
    match language {
        Fr => "Moins de marche : utiliser le Petit train pour le Trianon (1er départ 11:10).",
        En => "Less walking: take the Little Train to Trianon (first departure 11:10).",
    }
}

pub fn little_train_hint(language: Language) -> &'static str {
    match language {
        Fr => "Petit train recommandé",
        En => "Little Train recommended",
    }
}

pub fn gardens_note(language: Language) -> &'static str {
    match language {
        Fr => "Conseillé pour photos & espaces ouverts.",
        En => "Recommended for photos and open spaces.",
    }
}

pub fn palace_entry_note(entry: TimeOfDay, language: Language) -> String {
    match language {
        Fr => format!("Entrée au Château à l'heure du billet ({entry})."),
        En => format!("Palace entry at your ticket time ({entry})."),
    }
}

pub fn trianon_end_of_day_note(language: Language) -> &'static str {
    match language {
        Fr => "Trianon en fin de journée, après le Château.",
        En => "Trianon at the end of the day, after the Palace.",
    }
}

pub fn shortened_note(language: Language) -> &'static str {
    match language {
        Fr => "Visite écourtée (météo).",
        En => "Shortened visit (weather).",
    }
}

pub fn stroller_note(language: Language) -> &'static str {
    match language {
        Fr => "Accès poussette : privilégier les allées principales.",
        En => "Stroller access: stay on the main paths.",
    }
}

pub fn passport_ticket(language: Language) -> (&'static str, &'static str) {
    match language {
        Fr => ("Billet Passeport", "Accès Château, Jardins et Trianon."),
        En => ("Passport ticket", "Access to the Palace, Gardens and Trianon."),
    }
}

pub fn economy_ticket(language: Language) -> (&'static str, &'static str) {
    match language {
        Fr => (
            "Combinaison économique",
            "Jardins (si payants) + Trianon ou espaces gratuits selon météo.",
        ),
        En => (
            "Economy combination",
            "Gardens (when paid) + Trianon or free spaces depending on weather.",
        ),
    }
}

pub fn weather_unavailable_warning(language: Language) -> &'static str {
    match language {
        Fr => "Météo indisponible — voici un parcours sans contrainte météo.",
        En => "Weather unavailable — here is a plan assuming no weather constraints.",
    }
}

pub fn route_unavailable_warning(language: Language) -> &'static str {
    match language {
        Fr => "Itinéraire cartographique indisponible — suivez la signalétique du domaine entre les étapes.",
        En => "Map route unavailable — follow the estate signage between stops.",
    }
}
