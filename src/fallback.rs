//! Static fallback datasets, served when no live source is available or
//! the primary source is not yet populated. Built once, cloned per
//! catalog; never written into the cache.

use crate::models::{
    Airdrop, AirdropTask, AltseasonIndex, Article, ChartPoint, DefiTvl, FearGreedIndex,
    GainersLosers, GlobalMarket, Mover, PriceQuote, RainbowBand, Signal, Stablecoin,
    StablecoinDominance, StablecoinOverview, TvlProtocol,
};
use chrono::Utc;
use lazy_static::lazy_static;

/// The complete default dataset per content type. Swappable wholesale:
/// the resolver takes whichever catalog it is constructed with.
#[derive(Debug, Clone)]
pub struct FallbackCatalog {
    pub prices: Vec<PriceQuote>,
    pub fear_greed: FearGreedIndex,
    pub stablecoins: StablecoinOverview,
    pub defi_tvl: DefiTvl,
    pub global: GlobalMarket,
    pub chart: Vec<ChartPoint>,
    pub bitcoin_rainbow: RainbowBand,
    pub altcoin_season: AltseasonIndex,
    pub stablecoin_dominance: StablecoinDominance,
    pub gainers_losers: GainersLosers,
    pub articles: Vec<Article>,
    pub airdrops: Vec<Airdrop>,
    pub signals: Vec<Signal>,
}

lazy_static! {
    static ref DEFAULT_CATALOG: FallbackCatalog = build_catalog();
}

impl Default for FallbackCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

fn quote(
    id: &str,
    symbol: &str,
    name: &str,
    current_price: f64,
    price_change_24h: f64,
    market_cap: f64,
    volume_24h: f64,
) -> PriceQuote {
    PriceQuote {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price,
        price_change_24h,
        market_cap,
        volume_24h,
    }
}

fn stable(name: &str, symbol: &str, market_cap: f64, percentage: f64) -> Stablecoin {
    Stablecoin {
        name: name.to_string(),
        symbol: symbol.to_string(),
        market_cap,
        percentage,
    }
}

fn mover(symbol: &str, name: &str, price: f64, change_24h: f64) -> Mover {
    Mover {
        symbol: symbol.to_string(),
        name: name.to_string(),
        price,
        change_24h,
    }
}

fn task(id: &str, description: &str) -> AirdropTask {
    AirdropTask {
        id: id.to_string(),
        description: description.to_string(),
        completed: false,
    }
}

fn build_catalog() -> FallbackCatalog {
    let now = Utc::now().to_rfc3339();

    let prices = vec![
        quote("bitcoin", "BTC", "Bitcoin", 97_250.00, 1.85, 1_920_000_000_000.0, 42_500_000_000.0),
        quote("ethereum", "ETH", "Ethereum", 3_680.50, 2.15, 443_000_000_000.0, 18_200_000_000.0),
        quote("solana", "SOL", "Solana", 198.45, 3.25, 96_000_000_000.0, 4_800_000_000.0),
        quote("usd-coin", "USDC", "USD Coin", 1.00, 0.01, 42_000_000_000.0, 8_100_000_000.0),
    ];

    let fear_greed = FearGreedIndex {
        value: 62,
        classification: "Greed".to_string(),
        timestamp: Utc::now().timestamp().to_string(),
    };

    let stablecoins = StablecoinOverview {
        total_market_cap: 142_000_000_000.0,
        top_stablecoins: vec![
            stable("Tether", "USDT", 91_500_000_000.0, 64.4),
            stable("USD Coin", "USDC", 42_000_000_000.0, 29.6),
            stable("Dai", "DAI", 5_300_000_000.0, 3.7),
            stable("First Digital USD", "FDUSD", 1_800_000_000.0, 1.3),
            stable("PayPal USD", "PYUSD", 1_400_000_000.0, 1.0),
        ],
        updated_at: now.clone(),
        source: "static".to_string(),
    };

    let defi_tvl = DefiTvl {
        total_tvl: 48_500_000_000.0,
        change_24h: 2.3,
        top_protocols: vec![
            TvlProtocol { name: "Lido".to_string(), tvl: 23_400_000_000.0 },
            TvlProtocol { name: "Aave".to_string(), tvl: 10_200_000_000.0 },
            TvlProtocol { name: "Uniswap".to_string(), tvl: 4_800_000_000.0 },
        ],
        updated_at: now.clone(),
        source: "static".to_string(),
    };

    let global = GlobalMarket {
        total_market_cap_usd: 2_400_000_000_000.0,
        total_volume_24h_usd: 85_000_000_000.0,
        btc_dominance: 52.0,
        eth_dominance: 17.5,
        active_cryptocurrencies: 12_500,
        market_cap_change_24h: 1.4,
    };

    // Flat week of BTC history, one point per day ending now.
    let day_ms: i64 = 86_400_000;
    let now_ms = Utc::now().timestamp_millis();
    let chart = (0..7)
        .map(|i| ChartPoint {
            timestamp: now_ms - day_ms * (6 - i),
            price: 96_800.0 + 150.0 * i as f64,
        })
        .collect();

    let bitcoin_rainbow = RainbowBand {
        current_position: "Accumulate".to_string(),
        price_band: "$45,000 - $65,000".to_string(),
        recommendation: "Good time to buy".to_string(),
    };

    let altcoin_season = AltseasonIndex {
        value: 58,
        status: "Bitcoin Season".to_string(),
        description: "Bitcoin is outperforming altcoins".to_string(),
    };

    let stablecoin_dominance = StablecoinDominance {
        percentage: 6.8,
        total_supply: 142_000_000_000.0,
    };

    let gainers_losers = GainersLosers {
        gainers: vec![
            mover("ONDO", "Ondo Finance", 0.89, 28.5),
            mover("RENDER", "Render Token", 8.45, 18.2),
            mover("WLD", "Worldcoin", 3.24, 15.7),
        ],
        losers: vec![
            mover("BLUR", "Blur", 0.42, -12.3),
            mover("LDO", "Lido DAO", 2.15, -8.9),
            mover("APE", "ApeCoin", 1.68, -7.4),
        ],
    };

    FallbackCatalog {
        prices,
        fear_greed,
        stablecoins,
        defi_tvl,
        global,
        chart,
        bitcoin_rainbow,
        altcoin_season,
        stablecoin_dominance,
        gainers_losers,
        articles: build_articles(),
        airdrops: build_airdrops(),
        signals: build_signals(),
    }
}

fn article(
    id: &str,
    title: &str,
    excerpt: &str,
    content: &str,
    category: &str,
    premium: bool,
    published_at: &str,
    image_url: &str,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        premium,
        published_at: published_at.to_string(),
        image_url: image_url.to_string(),
    }
}

fn build_articles() -> Vec<Article> {
    vec![
        article(
            "1",
            "Stablecoins: La Revolución Silenciosa del Sistema Financiero",
            "Stripe, Visa y Mastercard se unen a la revolución. Los bancos adoptan stablecoins y las remesas nunca fueron más baratas.",
            "Las stablecoins están transformando silenciosamente el sistema financiero global. \
             Stripe, Visa y Mastercard han anunciado integraciones con USDC, el volumen anual supera \
             los $7.4 trillones y el costo promedio de una remesa cayó de 6.2% a 0.5%. No son solo \
             una herramienta de trading: son la infraestructura financiera del futuro.",
            "Stablecoins",
            false,
            "2024-02-01T10:00:00Z",
            "https://images.unsplash.com/photo-1670367248899-a7d385c732b5?crop=entropy&cs=srgb&fm=jpg&q=85&w=800",
        ),
        article(
            "2",
            "AI Agents y la Economía del Futuro",
            "El protocolo x402, Ethereum como backbone, y cómo los agentes de IA están creando una nueva economía autónoma.",
            "Los AI Agents están dejando de ser ciencia ficción para convertirse en actores económicos \
             reales. El protocolo x402 sobre Ethereum permite micropagos automáticos entre agentes, \
             abriendo una economía machine-to-machine donde billones de transacciones ocurren sin \
             intervención humana. Proyectos a seguir: Autonolas, Morpheus, Fetch.ai.",
            "AI",
            true,
            "2024-01-30T15:30:00Z",
            "https://images.unsplash.com/photo-1677442136019-21780ecad995?crop=entropy&cs=srgb&fm=jpg&q=85&w=800",
        ),
        article(
            "3",
            "¿Qué está pasando en Crypto en 2026?",
            "Un panorama completo del mercado: conflictos regulatorios, avances tecnológicos, minería y adopción institucional.",
            "El mercado cripto presenta un panorama de contrastes: dominance de Bitcoin en 52%, market \
             cap total de $2.4 trillones, ETFs spot acumulando más de $50 billones en AUM y batallas \
             regulatorias que definen el futuro de la industria. La narrativa cambió de especulación \
             a utilidad real.",
            "Analysis",
            false,
            "2024-01-28T09:00:00Z",
            "https://images.unsplash.com/photo-1642790106117-e829e14a795f?crop=entropy&cs=srgb&fm=jpg&q=85&w=800",
        ),
        article(
            "4",
            "DeFi 2.0: Protocolos con Yield Real",
            "Guía completa de los protocolos DeFi que generan rendimiento sostenible y real.",
            "El DeFi maduró desde el verano de 2020: los yields inflados por emisiones dieron paso a \
             protocolos con revenue real. GMX reparte fees de perpetuos, Aave y Compound cobran \
             intereses de préstamos, Lido captura recompensas de staking. Prioriza protocolos con \
             track record, auditorías y revenue real sobre APYs inflados.",
            "DeFi",
            true,
            "2024-01-25T14:00:00Z",
            "https://images.unsplash.com/photo-1543358021-87eba7df3eb5?crop=entropy&cs=srgb&fm=jpg&q=85&w=800",
        ),
        article(
            "5",
            "Layer 2 Wars: Arbitrum vs Optimism vs Base",
            "Análisis comparativo de los principales L2s y cuál ofrece mejores oportunidades de inversión.",
            "Arbitrum lidera con $12 billones de TVL y el ecosistema DeFi más maduro; Optimism apuesta \
             por la Superchain y el revenue sharing; Base crece con el onboarding de Coinbase y sin \
             token propio. Los L2s continuarán absorbiendo actividad de Ethereum mainnet y la \
             competencia beneficia a los usuarios con menores costos.",
            "Technology",
            false,
            "2024-01-20T11:00:00Z",
            "https://images.unsplash.com/photo-1666624833516-6d0e320c610d?crop=entropy&cs=srgb&fm=jpg&q=85&w=800",
        ),
    ]
}

fn build_airdrops() -> Vec<Airdrop> {
    let reward_note =
        "La recompensa varía según volumen de trading, puntos ganados y nivel de participación";

    vec![
        Airdrop {
            id: "1".to_string(),
            project_name: "Hyena Trade".to_string(),
            logo_url: "https://ui-avatars.com/api/?name=HT&background=10b981&color=fff&size=128&bold=true&format=svg".to_string(),
            description: "Perpetuals DEX en Arbitrum con fees competitivos y trading con apalancamiento".to_string(),
            full_description: Some("Exchange de perpetuos descentralizado en Arbitrum con hasta 50x de apalancamiento. Sin airdrop confirmado pero fuertes indicios del equipo.".to_string()),
            backing: Some("Respaldado por VCs líderes en DeFi, equipo experimentado de TradFi".to_string()),
            chain: Some("Arbitrum".to_string()),
            timeline: Some("Esperado Q2 2024".to_string()),
            reward_note: Some(reward_note.to_string()),
            tasks: vec![
                task("t1", "Conectar wallet y completar KYC (si es requerido)"),
                task("t2", "Hacer tu primer trade (mín $100 volumen)"),
                task("t3", "Tradear al menos 3 pares diferentes"),
                task("t4", "Proveer liquidez a cualquier pool"),
            ],
            estimated_reward: "$500-2000".to_string(),
            difficulty: "Medium".to_string(),
            deadline: "2024-06-30T23:59:59Z".to_string(),
            status: "active".to_string(),
            link: "https://app.hyena.trade/ref/ALPHACRYPTO".to_string(),
            premium: false,
        },
        Airdrop {
            id: "2".to_string(),
            project_name: "Extended Exchange".to_string(),
            logo_url: "https://ui-avatars.com/api/?name=EX&background=6366f1&color=fff&size=128&bold=true&format=svg".to_string(),
            description: "Plataforma avanzada de perpetuos con características únicas y APRs competitivos".to_string(),
            full_description: Some("Próxima generación de trading de perpetuos con vaults y social trading. Fuertes indicios de airdrop de la comunidad.".to_string()),
            backing: Some("Seed round de VCs crypto de primer nivel, equipo de Binance y FTX".to_string()),
            chain: Some("Arbitrum".to_string()),
            timeline: Some("Esperado Q3 2024".to_string()),
            reward_note: Some(reward_note.to_string()),
            tasks: vec![
                task("t1", "Registrarse usando código de referido: TOMDEFI"),
                task("t2", "Completar al menos $500 en volumen de trading"),
                task("t3", "Usar estrategias de vault (depositar mín $100)"),
                task("t4", "Tradear por 5+ días consecutivos"),
            ],
            estimated_reward: "$1000-3000".to_string(),
            difficulty: "Medium".to_string(),
            deadline: "2024-07-15T23:59:59Z".to_string(),
            status: "active".to_string(),
            link: "https://app.extended.exchange/join/TOMDEFI".to_string(),
            premium: false,
        },
        Airdrop {
            id: "3".to_string(),
            project_name: "GRVT".to_string(),
            logo_url: "https://ui-avatars.com/api/?name=GR&background=8b5cf6&color=fff&size=128&bold=true&format=svg".to_string(),
            description: "Exchange híbrido que combina la seguridad de DeFi con la experiencia de CeFi".to_string(),
            full_description: Some("GRVT construye un exchange híbrido sobre zkSync con self-custody y matching centralizado. Programa de puntos confirmado.".to_string()),
            backing: Some("Respaldado por ZKsync y fondos de infraestructura".to_string()),
            chain: Some("zkSync".to_string()),
            timeline: Some("Esperado Q4 2024".to_string()),
            reward_note: Some(reward_note.to_string()),
            tasks: vec![
                task("t1", "Crear cuenta y verificar email"),
                task("t2", "Depositar mín $50 en la plataforma"),
                task("t3", "Completar 10 trades"),
            ],
            estimated_reward: "$300-1500".to_string(),
            difficulty: "Easy".to_string(),
            deadline: "2024-09-30T23:59:59Z".to_string(),
            status: "upcoming".to_string(),
            link: "https://grvt.io".to_string(),
            premium: true,
        },
        Airdrop {
            id: "4".to_string(),
            project_name: "Eclipse".to_string(),
            logo_url: "https://ui-avatars.com/api/?name=EC&background=f59e0b&color=fff&size=128&bold=true&format=svg".to_string(),
            description: "Layer 2 de Ethereum impulsado por la SVM de Solana".to_string(),
            full_description: Some("Eclipse ejecuta la Solana Virtual Machine como L2 de Ethereum. Bridge abierto y campaña de puntos activa.".to_string()),
            backing: Some("Polychain, Placeholder y Hack VC".to_string()),
            chain: Some("Ethereum".to_string()),
            timeline: Some("Esperado Q1 2025".to_string()),
            reward_note: Some(reward_note.to_string()),
            tasks: vec![
                task("t1", "Bridgear ETH a Eclipse"),
                task("t2", "Usar al menos 2 dApps del ecosistema"),
                task("t3", "Mantener fondos 30 días en la red"),
            ],
            estimated_reward: "$400-2500".to_string(),
            difficulty: "Hard".to_string(),
            deadline: "2024-12-31T23:59:59Z".to_string(),
            status: "active".to_string(),
            link: "https://eclipse.xyz".to_string(),
            premium: true,
        },
        Airdrop {
            id: "5".to_string(),
            project_name: "Symbiotic".to_string(),
            logo_url: "https://ui-avatars.com/api/?name=SY&background=06b6d4&color=fff&size=128&bold=true&format=svg".to_string(),
            description: "Protocolo de restaking permissionless competidor de EigenLayer".to_string(),
            full_description: Some("Symbiotic permite restakear cualquier colateral ERC-20. Depósitos abiertos con sistema de puntos retroactivo.".to_string()),
            backing: Some("Paradigm y cyber.fund".to_string()),
            chain: Some("Ethereum".to_string()),
            timeline: Some("TBD".to_string()),
            reward_note: Some(reward_note.to_string()),
            tasks: vec![
                task("t1", "Depositar stETH o wBTC en los vaults"),
                task("t2", "Acumular puntos semanales"),
            ],
            estimated_reward: "$200-1000".to_string(),
            difficulty: "Easy".to_string(),
            deadline: "2024-05-31T23:59:59Z".to_string(),
            status: "ended".to_string(),
            link: "https://symbiotic.fi".to_string(),
            premium: false,
        },
    ]
}

fn signal(
    id: &str,
    kind: &str,
    priority: &str,
    title: &str,
    description: &str,
    action: Option<&str>,
    link: Option<&str>,
    premium: bool,
) -> Signal {
    Signal {
        id: id.to_string(),
        kind: kind.to_string(),
        priority: priority.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        action: action.map(str::to_string),
        link: link.map(str::to_string),
        timestamp: Utc::now().to_rfc3339(),
        premium,
    }
}

fn build_signals() -> Vec<Signal> {
    vec![
        signal(
            "1", "opportunity", "high",
            "Arbitrum Airdrop Season 2 Hints",
            "El equipo de Arbitrum ha insinuado una segunda ronda de airdrops. Usuarios activos en el ecosistema podrían calificar.",
            Some("Bridge y usar protocolos en Arbitrum"), Some("https://arbitrum.io"), false,
        ),
        signal(
            "2", "alert", "urgent",
            "Bitcoin: Soporte Clave en $68K",
            "BTC testeando soporte crítico. Ruptura podría llevar a $62K. Mantener stables listos para compra.",
            Some("Set buy orders at $65K"), None, true,
        ),
        signal(
            "3", "news", "medium",
            "BlackRock ETF: Record Inflows",
            "IBIT de BlackRock registró $500M en entradas en un solo día. Señal alcista institucional.",
            None, None, false,
        ),
        signal(
            "4", "opportunity", "high",
            "Solana DEX Rewards Program",
            "Jupiter Exchange lanzó programa de puntos. Traders activos acumulan para posible airdrop.",
            Some("Trade en Jupiter, acumular puntos"), Some("https://jup.ag"), false,
        ),
        signal(
            "5", "community", "low",
            "Alpha Crypto Discord: Q&A Esta Semana",
            "Sesión de preguntas y respuestas con el equipo de análisis. Jueves 8PM UTC.",
            None, None, false,
        ),
        signal(
            "6", "alert", "high",
            "ETH: Patrón Técnico Formándose",
            "Ethereum formando cuña descendente. Breakout alcista esperado si supera $2,200.",
            Some("Watch for breakout confirmation"), None, true,
        ),
        signal(
            "7", "news", "medium",
            "Stripe Expande Pagos Crypto",
            "Stripe habilita pagos con USDC para más merchants. Adopción institucional acelerando.",
            None, None, false,
        ),
        signal(
            "8", "opportunity", "urgent",
            "Base: Nueva Temporada de Incentivos",
            "Coinbase Base L2 lanzando programa de incentivos. $10M en rewards para usuarios activos.",
            Some("Bridge a Base y usar DeFi"), Some("https://base.org"), true,
        ),
    ]
}
