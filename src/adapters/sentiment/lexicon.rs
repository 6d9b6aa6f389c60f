//! Valence lexicon, boosters and negations for the sentiment analyzer.
//!
//! Valences run from -4 (most negative) to +4 (most positive).

/// Word valences.
pub(super) const VALENCES: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abandoned", -2.0),
    ("abuse", -3.2),
    ("accept", 1.6),
    ("accepted", 1.1),
    ("accomplish", 1.8),
    ("accomplished", 1.9),
    ("achieve", 1.3),
    ("achievement", 2.1),
    ("admire", 2.1),
    ("adore", 2.6),
    ("advantage", 1.0),
    ("afraid", -2.2),
    ("aggressive", -0.6),
    ("agree", 1.5),
    ("alarming", -1.9),
    ("alone", -1.0),
    ("amazing", 2.8),
    ("anger", -2.7),
    ("angry", -2.3),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("anxious", -1.0),
    ("appreciate", 1.7),
    ("approve", 1.5),
    ("argue", -1.4),
    ("ashamed", -2.1),
    ("attractive", 1.9),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("benefit", 2.0),
    ("best", 3.2),
    ("better", 1.9),
    ("bitter", -1.8),
    ("blame", -1.4),
    ("bored", -1.1),
    ("boring", -1.3),
    ("brave", 2.4),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("broken", -2.1),
    ("calm", 1.3),
    ("care", 2.2),
    ("careful", 0.6),
    ("celebrate", 2.7),
    ("charming", 2.8),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("clear", 1.6),
    ("clever", 2.0),
    ("comfort", 1.5),
    ("comfortable", 2.3),
    ("confident", 2.2),
    ("confused", -1.3),
    ("confusing", -0.9),
    ("cool", 1.3),
    ("courage", 2.2),
    ("crazy", -1.4),
    ("creative", 1.9),
    ("crisis", -3.1),
    ("critical", -1.3),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("damage", -2.2),
    ("danger", -2.4),
    ("dangerous", -2.1),
    ("dead", -3.3),
    ("death", -2.9),
    ("defeat", -2.0),
    ("delight", 2.9),
    ("delightful", 2.8),
    ("depressed", -2.3),
    ("depressing", -1.6),
    ("desire", 1.7),
    ("despair", -1.3),
    ("destroy", -2.5),
    ("difficult", -1.5),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("dislike", -1.6),
    ("distress", -2.4),
    ("doubt", -1.5),
    ("dread", -2.0),
    ("eager", 1.5),
    ("easy", 1.9),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("embarrassed", -1.5),
    ("encourage", 2.3),
    ("energetic", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("enthusiastic", 1.9),
    ("evil", -3.4),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fair", 1.3),
    ("fake", -2.1),
    ("fantastic", 2.6),
    ("fear", -2.2),
    ("fine", 0.8),
    ("fond", 1.9),
    ("fool", -1.9),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("gloomy", -1.9),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("grief", -2.2),
    ("guilty", -1.8),
    ("happiness", 2.6),
    ("happy", 2.7),
    ("hard", -0.4),
    ("harm", -2.5),
    ("harmful", -2.3),
    ("hate", -2.7),
    ("hated", -3.2),
    ("healthy", 1.7),
    ("heartbroken", -3.3),
    ("help", 1.7),
    ("helpful", 1.8),
    ("helpless", -2.0),
    ("hero", 2.6),
    ("honest", 2.3),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("hopeless", -2.0),
    ("horrible", -2.5),
    ("hostile", -2.2),
    ("hurt", -2.4),
    ("ideal", 2.4),
    ("ignore", -1.5),
    ("ill", -1.8),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("inspire", 2.7),
    ("inspiring", 2.6),
    ("interesting", 1.7),
    ("jealous", -2.0),
    ("joy", 2.8),
    ("kind", 2.4),
    ("kill", -3.7),
    ("lazy", -1.5),
    ("like", 1.5),
    ("lonely", -1.7),
    ("lose", -1.6),
    ("loss", -1.3),
    ("lost", -1.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("lucky", 1.8),
    ("mad", -2.2),
    ("mess", -1.5),
    ("miserable", -2.2),
    ("miss", -0.6),
    ("mistake", -1.7),
    ("nasty", -2.6),
    ("negative", -2.7),
    ("nervous", -1.1),
    ("nice", 1.8),
    ("optimistic", 2.4),
    ("pain", -2.3),
    ("painful", -1.9),
    ("panic", -2.3),
    ("passion", 2.0),
    ("peace", 2.5),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("please", 1.3),
    ("pleased", 1.9),
    ("pleasure", 2.7),
    ("poor", -2.1),
    ("popular", 1.8),
    ("positive", 2.6),
    ("powerful", 1.8),
    ("pretty", 2.2),
    ("pride", 1.4),
    ("problem", -1.7),
    ("progress", 1.8),
    ("protect", 1.3),
    ("proud", 2.1),
    ("reject", -1.7),
    ("relaxed", 2.2),
    ("reliable", 1.7),
    ("relief", 2.1),
    ("respect", 2.1),
    ("rich", 2.6),
    ("risk", -1.1),
    ("rude", -2.0),
    ("ruin", -2.8),
    ("sad", -2.1),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("scared", -1.9),
    ("selfish", -2.1),
    ("serious", -0.3),
    ("shame", -2.1),
    ("shock", -1.6),
    ("sick", -2.3),
    ("silly", 0.1),
    ("smart", 1.7),
    ("smile", 1.5),
    ("sorry", -0.3),
    ("special", 1.7),
    ("strong", 2.3),
    ("stupid", -2.4),
    ("success", 2.7),
    ("successful", 2.8),
    ("suffer", -2.5),
    ("super", 2.9),
    ("support", 1.7),
    ("sure", 1.3),
    ("surprise", 1.1),
    ("sweet", 2.0),
    ("talent", 1.4),
    ("terrible", -2.1),
    ("terrific", 3.1),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("threat", -2.4),
    ("tired", -1.9),
    ("tragedy", -3.4),
    ("tragic", -3.2),
    ("trouble", -1.7),
    ("true", 1.5),
    ("trust", 2.3),
    ("ugly", -2.3),
    ("unfair", -2.1),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useful", 1.9),
    ("useless", -1.8),
    ("valuable", 2.1),
    ("victory", 2.8),
    ("violence", -3.1),
    ("warm", 0.9),
    ("weak", -1.9),
    ("wealth", 2.2),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winner", 2.8),
    ("wise", 1.8),
    ("wonderful", 2.7),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -1.9),
    ("worthy", 1.9),
    ("wrong", -2.1),
];

/// Words that intensify (positive scalar) or dampen (negative scalar) the
/// word that follows.
pub(super) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", INCREMENT),
    ("completely", INCREMENT),
    ("considerably", INCREMENT),
    ("deeply", INCREMENT),
    ("enormously", INCREMENT),
    ("entirely", INCREMENT),
    ("especially", INCREMENT),
    ("exceptionally", INCREMENT),
    ("extremely", INCREMENT),
    ("greatly", INCREMENT),
    ("highly", INCREMENT),
    ("hugely", INCREMENT),
    ("incredibly", INCREMENT),
    ("most", INCREMENT),
    ("much", INCREMENT),
    ("particularly", INCREMENT),
    ("purely", INCREMENT),
    ("quite", INCREMENT),
    ("really", INCREMENT),
    ("remarkably", INCREMENT),
    ("so", INCREMENT),
    ("substantially", INCREMENT),
    ("thoroughly", INCREMENT),
    ("totally", INCREMENT),
    ("tremendously", INCREMENT),
    ("truly", INCREMENT),
    ("utterly", INCREMENT),
    ("very", INCREMENT),
    ("almost", DECREMENT),
    ("barely", DECREMENT),
    ("hardly", DECREMENT),
    ("less", DECREMENT),
    ("little", DECREMENT),
    ("marginally", DECREMENT),
    ("occasionally", DECREMENT),
    ("partly", DECREMENT),
    ("scarcely", DECREMENT),
    ("slightly", DECREMENT),
    ("somewhat", DECREMENT),
];

/// Words that flip the polarity of what follows.
pub(super) const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
    "rarely", "seldom", "despite",
];

/// Scalar added by an intensifying booster.
pub(super) const INCREMENT: f64 = 0.293;

/// Scalar added by a dampening booster.
pub(super) const DECREMENT: f64 = -0.293;
