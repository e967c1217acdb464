//! Category catalog: the read-only metadata every search is resolved
//! against. Ships a built-in catalog and merges operator-supplied TOML
//! category files over it.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::category::{Category, CategoryId};
use crate::domain::platform::Platform;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate category id `{0}` in catalog")]
    DuplicateCategory(String),
    #[error("category `{category}` lists platform `{platform}` more than once")]
    DuplicatePlatform { category: String, platform: String },
}

#[derive(Clone, Debug, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        for (index, category) in categories.iter().enumerate() {
            if categories[..index].iter().any(|earlier| earlier.id == category.id) {
                return Err(CatalogError::DuplicateCategory(category.id.0.clone()));
            }
            for (platform_index, platform) in category.platforms.iter().enumerate() {
                if category.platforms[..platform_index]
                    .iter()
                    .any(|earlier| earlier.id == platform.id)
                {
                    return Err(CatalogError::DuplicatePlatform {
                        category: category.id.0.clone(),
                        platform: platform.id.0.clone(),
                    });
                }
            }
        }
        Ok(Self { categories })
    }

    pub fn find(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories from `other` replace same-id entries and append new ones;
    /// relative order of surviving entries is preserved.
    pub fn merge(mut self, other: CategoryCatalog) -> Self {
        for category in other.categories {
            match self.categories.iter_mut().find(|existing| existing.id == category.id) {
                Some(existing) => *existing = category,
                None => self.categories.push(category),
            }
        }
        self
    }

    /// Parse a standalone catalog from TOML. Use [`CategoryCatalog::merge`]
    /// to layer it over the built-ins.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        let categories = file.category.into_iter().map(CategoryEntry::into_category).collect();
        Self::new(categories)
    }

    /// Read a catalog file and merge it over the built-in catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let extra = Self::from_toml_str(&raw)?;
        Ok(Self::builtin().merge(extra))
    }

    pub fn builtin() -> Self {
        let categories = vec![
            entertainment(),
            food_delivery(),
            cryptocurrency(),
            flights(),
            mutual_funds(),
            ride_hailing(),
            retail(
                "electronics",
                "Electronics",
                &["headphones", "camera", "speaker", "tv"],
                6,
                (1_500, 120_000),
                vec![amazon(), flipkart(), croma(), reliance_digital()],
            ),
            retail(
                "mobiles",
                "Mobiles",
                &["iphone", "samsung", "pixel", "oneplus", "5g"],
                5,
                (8_000, 150_000),
                vec![amazon(), flipkart(), croma()],
            ),
            retail(
                "laptops",
                "Laptops",
                &["macbook", "thinkpad", "gaming laptop", "ultrabook"],
                5,
                (25_000, 250_000),
                vec![amazon(), flipkart(), vijay_sales()],
            ),
            retail(
                "fashion",
                "Fashion",
                &["kurta", "jeans", "dress", "saree", "t-shirt"],
                6,
                (400, 6_000),
                vec![myntra(), ajio(), amazon()],
            ),
            retail(
                "footwear",
                "Footwear",
                &["sneakers", "running shoes", "sandals", "loafers"],
                5,
                (500, 9_000),
                vec![myntra(), ajio(), flipkart()],
            ),
            retail(
                "groceries",
                "Groceries",
                &["atta", "rice", "milk", "vegetables", "snacks"],
                6,
                (50, 800),
                vec![bigbasket(), blinkit(), zepto(), jiomart()],
            ),
            retail(
                "furniture",
                "Furniture",
                &["sofa", "bed", "dining table", "bookshelf"],
                4,
                (2_000, 80_000),
                vec![pepperfry(), urban_ladder(), amazon()],
            ),
            retail(
                "books",
                "Books",
                &["novel", "textbook", "biography", "comics"],
                6,
                (150, 1_500),
                vec![amazon(), flipkart(), kitabay()],
            ),
            retail(
                "beauty",
                "Beauty",
                &["lipstick", "serum", "sunscreen", "perfume"],
                6,
                (150, 4_000),
                vec![nykaa(), purplle(), amazon()],
            ),
            retail(
                "appliances",
                "Home Appliances",
                &["refrigerator", "washing machine", "microwave", "ac"],
                4,
                (3_000, 90_000),
                vec![croma(), reliance_digital(), amazon()],
            ),
            retail(
                "toys",
                "Toys",
                &["lego", "remote car", "board game", "soft toy"],
                5,
                (200, 5_000),
                vec![firstcry(), amazon(), flipkart()],
            ),
            retail(
                "sports",
                "Sports & Fitness",
                &["cricket bat", "dumbbells", "yoga mat", "cycle"],
                5,
                (300, 20_000),
                vec![decathlon(), amazon(), flipkart()],
            ),
            retail(
                "watches",
                "Watches",
                &["smartwatch", "analog", "chronograph"],
                5,
                (1_000, 50_000),
                vec![titan_world(), amazon(), flipkart()],
            ),
            retail(
                "jewellery",
                "Jewellery",
                &["gold chain", "earrings", "diamond ring"],
                4,
                (5_000, 300_000),
                vec![tanishq(), caratlane(), bluestone()],
            ),
            retail(
                "pharmacy",
                "Pharmacy",
                &["paracetamol", "vitamins", "protein", "first aid"],
                6,
                (50, 2_000),
                vec![pharmeasy(), netmeds(), tata_1mg(), apollo()],
            ),
            retail(
                "stationery",
                "Stationery",
                &["notebook", "fountain pen", "markers"],
                5,
                (50, 1_500),
                vec![amazon(), flipkart()],
            ),
            retail(
                "pet-supplies",
                "Pet Supplies",
                &["dog food", "cat litter", "aquarium"],
                5,
                (200, 8_000),
                vec![supertails(), heads_up_for_tails(), amazon()],
            ),
            fallback_only(
                "hotels",
                "Hotels",
                &["resort", "homestay", "business hotel"],
                (1_200, 15_000),
                vec![
                    Platform::new("bookingcom", "Booking.com", "https://www.booking.com", "#003580")
                        .with_features(&["free-cancellation", "pay-at-hotel"])
                        .with_rating(4.4),
                    Platform::new("oyo", "OYO", "https://www.oyorooms.com", "#EE2E24")
                        .with_rating(3.9)
                        .with_discounts(&["Up to 60% off on first booking"]),
                    Platform::new("agoda", "Agoda", "https://www.agoda.com", "#FF6100")
                        .with_rating(4.2),
                ],
            ),
            fallback_only(
                "broadband",
                "Broadband",
                &["fiber", "unlimited", "wifi plan"],
                (399, 3_999),
                vec![
                    Platform::new("jiofiber", "JioFiber", "https://www.jio.com/fiber", "#0A2885")
                        .with_delivery("2-3 days")
                        .with_rating(4.1)
                        .with_discounts(&["First month free on annual plans"]),
                    Platform::new(
                        "airtel-xstream",
                        "Airtel Xstream",
                        "https://www.airtel.in/broadband",
                        "#E40000",
                    )
                    .with_delivery("2-3 days")
                    .with_rating(4.2),
                    Platform::new("act", "ACT Fibernet", "https://www.actcorp.in", "#F37021")
                        .with_delivery("3-5 days")
                        .with_rating(4.0),
                ],
            ),
            fallback_only(
                "insurance",
                "Insurance",
                &["term plan", "health cover", "car insurance"],
                (500, 25_000),
                vec![
                    Platform::new(
                        "policybazaar",
                        "Policybazaar",
                        "https://www.policybazaar.com",
                        "#0065FF",
                    )
                    .with_delivery("Instant")
                    .with_rating(4.3),
                    Platform::new("acko", "Acko", "https://www.acko.com", "#65278A")
                        .with_delivery("Instant")
                        .with_rating(4.2)
                        .with_discounts(&["Paperless claims in minutes"]),
                    Platform::new("digit", "Digit", "https://www.godigit.com", "#30A854")
                        .with_delivery("Instant")
                        .with_rating(4.1),
                ],
            ),
            fallback_only(
                "gift-cards",
                "Gift Cards",
                &["birthday", "anniversary", "corporate"],
                (100, 10_000),
                vec![
                    Platform::new("amazon-pay", "Amazon Pay", "https://www.amazon.in/gift-cards", "#FF9900")
                        .with_delivery("Instant")
                        .with_rating(4.5),
                    Platform::new("woohoo", "Woohoo", "https://www.woohoo.in", "#EC008C")
                        .with_delivery("Instant")
                        .with_rating(4.0)
                        .with_discounts(&["Flat 5% off with coupon WOO5"]),
                ],
            ),
        ];

        // Built-in ids are unique; `new` cannot fail on this data.
        Self::new(categories).unwrap_or_default()
    }
}

fn retail(
    id: &str,
    name: &str,
    keywords: &[&str],
    cap: usize,
    band: (u32, u32),
    platforms: Vec<Platform>,
) -> Category {
    Category::new(id, name)
        .with_platforms(platforms)
        .with_keywords(keywords)
        .with_result_cap(cap)
        .with_price_range(band.0, band.1)
}

fn fallback_only(
    id: &str,
    name: &str,
    keywords: &[&str],
    band: (u32, u32),
    platforms: Vec<Platform>,
) -> Category {
    Category::new(id, name)
        .with_platforms(platforms)
        .with_keywords(keywords)
        .with_result_cap(1)
        .with_price_range(band.0, band.1)
}

fn entertainment() -> Category {
    Category::new("entertainment", "Entertainment")
        .with_platforms(vec![
            Platform::new("netflix", "Netflix", "https://www.netflix.com", "#E50914")
                .with_features(&["subscription", "4k", "originals"])
                .with_multiplier(Decimal::new(100, 2))
                .with_rating(4.5),
            Platform::new("prime-video", "Prime Video", "https://www.primevideo.com", "#00A8E1")
                .with_features(&["subscription", "rentals"])
                .with_multiplier(Decimal::new(95, 2))
                .with_rating(4.3)
                .with_discounts(&["Included with Prime membership"]),
            Platform::new("hotstar", "Disney+ Hotstar", "https://www.hotstar.com", "#113CCF")
                .with_features(&["subscription", "live-sports"])
                .with_multiplier(Decimal::new(90, 2))
                .with_rating(4.2),
            Platform::new("bookmyshow", "BookMyShow Stream", "https://www.bookmyshow.com", "#C4242B")
                .with_features(&["rentals", "premieres"])
                .with_multiplier(Decimal::new(110, 2))
                .with_rating(4.0),
        ])
        .with_keywords(&["movie", "series", "web series", "anime"])
        .with_result_cap(5)
        .with_price_range(99, 599)
        .with_default_item_name("Trending Titles")
}

fn food_delivery() -> Category {
    Category::new("food-delivery", "Food Delivery")
        .with_platforms(vec![
            Platform::new("swiggy", "Swiggy", "https://www.swiggy.com", "#FC8019")
                .with_multiplier(Decimal::new(100, 2))
                .with_delivery("25-35 mins")
                .with_rating(4.3)
                .with_discounts(&["50% off up to \u{20B9}100 with SWIGGYIT"]),
            Platform::new("zomato", "Zomato", "https://www.zomato.com", "#E23744")
                .with_multiplier(Decimal::new(97, 2))
                .with_delivery("30-40 mins")
                .with_rating(4.2)
                .with_discounts(&["60% off up to \u{20B9}120 with ZOMATONEW"]),
            Platform::new("eatsure", "EatSure", "https://www.eatsure.com", "#5C2D91")
                .with_multiplier(Decimal::new(104, 2))
                .with_delivery("35-45 mins")
                .with_rating(4.0)
                .with_discounts(&["Free delivery above \u{20B9}199"]),
        ])
        .with_keywords(&["pizza", "biryani", "burger", "dosa", "thali"])
        .with_result_cap(8)
        .with_price_range(100, 600)
        .with_default_item_name("Popular Dishes")
}

fn cryptocurrency() -> Category {
    Category::new("cryptocurrency", "Cryptocurrency")
        .with_platforms(vec![
            Platform::new("wazirx", "WazirX", "https://wazirx.com", "#3067F0")
                .with_features(&["inr-deposits", "spot"])
                .with_delivery("Instant")
                .with_rating(4.1)
                .with_discounts(&["Zero fees on first trade"]),
            Platform::new("coindcx", "CoinDCX", "https://coindcx.com", "#1A82FF")
                .with_features(&["spot", "futures"])
                .with_delivery("Instant")
                .with_rating(4.3),
            Platform::new("zebpay", "ZebPay", "https://zebpay.com", "#3B59F6")
                .with_features(&["spot", "lending"])
                .with_delivery("Instant")
                .with_rating(3.9),
        ])
        .with_keywords(&["bitcoin", "ethereum", "solana", "dogecoin"])
        .with_result_cap(3)
        .with_price_range(50_000, 5_000_000)
        .with_default_item_name("Bitcoin")
}

fn flights() -> Category {
    Category::new("flights", "Flights")
        .with_platforms(vec![
            Platform::new("makemytrip", "MakeMyTrip", "https://www.makemytrip.com", "#E7001D")
                .with_multiplier(Decimal::new(102, 2))
                .with_rating(4.2)
                .with_discounts(&["\u{20B9}500 off with MMTFLY"]),
            Platform::new("cleartrip", "Cleartrip", "https://www.cleartrip.com", "#FF6D38")
                .with_multiplier(Decimal::new(99, 2))
                .with_rating(4.1),
            Platform::new("goibibo", "Goibibo", "https://www.goibibo.com", "#2276E3")
                .with_multiplier(Decimal::new(98, 2))
                .with_rating(4.0)
                .with_discounts(&["Flat 8% off for new users"]),
            Platform::new("yatra", "Yatra", "https://www.yatra.com", "#D32F2F")
                .with_multiplier(Decimal::new(103, 2))
                .with_rating(3.9),
        ])
        .with_keywords(&["delhi", "mumbai", "bangalore", "goa", "one-way"])
        .with_result_cap(5)
        .with_price_range(2_500, 18_000)
        .with_default_item_name("Popular Routes")
}

fn mutual_funds() -> Category {
    Category::new("mutual-funds", "Mutual Funds")
        .with_platforms(vec![
            Platform::new("groww", "Groww", "https://groww.in", "#00D09C")
                .with_features(&["direct-plans", "sip"])
                .with_delivery("Instant")
                .with_rating(4.5),
            Platform::new("kuvera", "Kuvera", "https://kuvera.in", "#5A2D82")
                .with_features(&["direct-plans", "goal-planning"])
                .with_delivery("Instant")
                .with_rating(4.3),
            Platform::new("coin", "Zerodha Coin", "https://coin.zerodha.com", "#387ED1")
                .with_features(&["direct-plans"])
                .with_delivery("Instant")
                .with_rating(4.4),
            Platform::new("paytm-money", "Paytm Money", "https://www.paytmmoney.com", "#00BAF2")
                .with_features(&["direct-plans", "nps"])
                .with_delivery("Instant")
                .with_rating(4.0),
        ])
        .with_keywords(&["index fund", "elss", "flexi cap", "bluechip"])
        .with_result_cap(6)
        .with_price_range(500, 5_000)
        .with_default_item_name("Top Rated Funds")
}

fn ride_hailing() -> Category {
    Category::new("ride-hailing", "Ride Hailing")
        .with_platforms(vec![
            Platform::new("uber", "Uber", "https://www.uber.com", "#000000")
                .with_multiplier(Decimal::new(105, 2))
                .with_rating(4.2),
            Platform::new("ola", "Ola", "https://www.olacabs.com", "#A4C639")
                .with_multiplier(Decimal::new(100, 2))
                .with_rating(4.0)
                .with_discounts(&["20% off first 3 rides"]),
            Platform::new("rapido", "Rapido", "https://www.rapido.bike", "#FFC907")
                .with_multiplier(Decimal::new(80, 2))
                .with_rating(4.1),
        ])
        .with_keywords(&["airport", "office", "railway station"])
        .with_result_cap(5)
        .with_price_range(80, 900)
        .with_default_item_name("Nearby Rides")
}

fn amazon() -> Platform {
    Platform::new("amazon", "Amazon", "https://www.amazon.in", "#FF9900")
        .with_features(&["prime", "easy-returns"])
        .with_multiplier(Decimal::new(100, 2))
        .with_delivery("1-2 days")
        .with_rating(4.4)
        .with_discounts(&["10% instant discount with select cards"])
}

fn flipkart() -> Platform {
    Platform::new("flipkart", "Flipkart", "https://www.flipkart.com", "#2874F0")
        .with_features(&["plus", "open-box-delivery"])
        .with_multiplier(Decimal::new(98, 2))
        .with_delivery("2-3 days")
        .with_rating(4.3)
        .with_discounts(&["Extra 5% off with Axis Bank card"])
}

fn croma() -> Platform {
    Platform::new("croma", "Croma", "https://www.croma.com", "#12DAA8")
        .with_features(&["in-store-pickup"])
        .with_multiplier(Decimal::new(103, 2))
        .with_delivery("2-4 days")
        .with_rating(4.1)
}

fn reliance_digital() -> Platform {
    Platform::new("reliance-digital", "Reliance Digital", "https://www.reliancedigital.in", "#E42529")
        .with_multiplier(Decimal::new(102, 2))
        .with_delivery("3-5 days")
        .with_rating(4.0)
        .with_discounts(&["No-cost EMI on select items"])
}

fn vijay_sales() -> Platform {
    Platform::new("vijay-sales", "Vijay Sales", "https://www.vijaysales.com", "#D71920")
        .with_multiplier(Decimal::new(101, 2))
        .with_delivery("3-5 days")
        .with_rating(3.9)
}

fn myntra() -> Platform {
    Platform::new("myntra", "Myntra", "https://www.myntra.com", "#FF3F6C")
        .with_features(&["try-and-buy", "easy-returns"])
        .with_multiplier(Decimal::new(97, 2))
        .with_delivery("2-4 days")
        .with_rating(4.3)
        .with_discounts(&["Flat \u{20B9}200 off on first order"])
}

fn ajio() -> Platform {
    Platform::new("ajio", "AJIO", "https://www.ajio.com", "#2C4152")
        .with_multiplier(Decimal::new(94, 2))
        .with_delivery("3-6 days")
        .with_rating(4.0)
        .with_discounts(&["Up to 70% off on trends"])
}

fn bigbasket() -> Platform {
    Platform::new("bigbasket", "BigBasket", "https://www.bigbasket.com", "#84C225")
        .with_multiplier(Decimal::new(98, 2))
        .with_delivery("90 mins")
        .with_rating(4.2)
        .with_discounts(&["\u{20B9}100 off above \u{20B9}1000"])
}

fn blinkit() -> Platform {
    Platform::new("blinkit", "Blinkit", "https://blinkit.com", "#F8CB46")
        .with_multiplier(Decimal::new(106, 2))
        .with_delivery("10 mins")
        .with_rating(4.4)
}

fn zepto() -> Platform {
    Platform::new("zepto", "Zepto", "https://www.zeptonow.com", "#6C2BD9")
        .with_multiplier(Decimal::new(105, 2))
        .with_delivery("10-15 mins")
        .with_rating(4.3)
        .with_discounts(&["Flat 20% off on first order"])
}

fn jiomart() -> Platform {
    Platform::new("jiomart", "JioMart", "https://www.jiomart.com", "#0C5273")
        .with_multiplier(Decimal::new(95, 2))
        .with_delivery("1-2 days")
        .with_rating(4.0)
}

fn pepperfry() -> Platform {
    Platform::new("pepperfry", "Pepperfry", "https://www.pepperfry.com", "#F16521")
        .with_multiplier(Decimal::new(100, 2))
        .with_delivery("7-10 days")
        .with_rating(4.1)
        .with_discounts(&["Assembly included"])
}

fn urban_ladder() -> Platform {
    Platform::new("urban-ladder", "Urban Ladder", "https://www.urbanladder.com", "#7A2F2F")
        .with_multiplier(Decimal::new(104, 2))
        .with_delivery("7-12 days")
        .with_rating(4.0)
}

fn kitabay() -> Platform {
    Platform::new("kitabay", "Kitabay", "https://www.kitabay.com", "#1B5E20")
        .with_multiplier(Decimal::new(85, 2))
        .with_delivery("4-7 days")
        .with_rating(4.2)
        .with_discounts(&["Pre-loved editions up to 50% off"])
}

fn nykaa() -> Platform {
    Platform::new("nykaa", "Nykaa", "https://www.nykaa.com", "#FC2779")
        .with_features(&["authenticity-guarantee"])
        .with_multiplier(Decimal::new(100, 2))
        .with_delivery("2-4 days")
        .with_rating(4.4)
        .with_discounts(&["Free gift above \u{20B9}799"])
}

fn purplle() -> Platform {
    Platform::new("purplle", "Purplle", "https://www.purplle.com", "#8B008B")
        .with_multiplier(Decimal::new(93, 2))
        .with_delivery("3-6 days")
        .with_rating(4.1)
}

fn firstcry() -> Platform {
    Platform::new("firstcry", "FirstCry", "https://www.firstcry.com", "#FBB03B")
        .with_multiplier(Decimal::new(96, 2))
        .with_delivery("2-4 days")
        .with_rating(4.3)
        .with_discounts(&["Club members save extra 10%"])
}

fn decathlon() -> Platform {
    Platform::new("decathlon", "Decathlon", "https://www.decathlon.in", "#0082C3")
        .with_features(&["in-store-pickup", "2-year-warranty"])
        .with_multiplier(Decimal::new(95, 2))
        .with_delivery("2-5 days")
        .with_rating(4.5)
}

fn titan_world() -> Platform {
    Platform::new("titan-world", "Titan World", "https://www.titan.co.in", "#4A148C")
        .with_multiplier(Decimal::new(105, 2))
        .with_delivery("3-5 days")
        .with_rating(4.3)
}

fn tanishq() -> Platform {
    Platform::new("tanishq", "Tanishq", "https://www.tanishq.co.in", "#832729")
        .with_features(&["hallmarked", "exchange"])
        .with_multiplier(Decimal::new(108, 2))
        .with_delivery("5-7 days")
        .with_rating(4.6)
}

fn caratlane() -> Platform {
    Platform::new("caratlane", "CaratLane", "https://www.caratlane.com", "#6A1B9A")
        .with_multiplier(Decimal::new(100, 2))
        .with_delivery("4-6 days")
        .with_rating(4.4)
        .with_discounts(&["Free try-at-home"])
}

fn bluestone() -> Platform {
    Platform::new("bluestone", "BlueStone", "https://www.bluestone.com", "#00838F")
        .with_multiplier(Decimal::new(97, 2))
        .with_delivery("5-8 days")
        .with_rating(4.2)
}

fn pharmeasy() -> Platform {
    Platform::new("pharmeasy", "PharmEasy", "https://pharmeasy.in", "#10847E")
        .with_multiplier(Decimal::new(90, 2))
        .with_delivery("1-2 days")
        .with_rating(4.2)
        .with_discounts(&["Flat 20% off on medicines"])
}

fn netmeds() -> Platform {
    Platform::new("netmeds", "Netmeds", "https://www.netmeds.com", "#20B2AA")
        .with_multiplier(Decimal::new(92, 2))
        .with_delivery("2-3 days")
        .with_rating(4.0)
}

fn tata_1mg() -> Platform {
    Platform::new("tata-1mg", "Tata 1mg", "https://www.1mg.com", "#FF6F61")
        .with_multiplier(Decimal::new(91, 2))
        .with_delivery("1-2 days")
        .with_rating(4.3)
        .with_discounts(&["15% off for care plan members"])
}

fn apollo() -> Platform {
    Platform::new("apollo", "Apollo 24|7", "https://www.apollo247.com", "#02475E")
        .with_multiplier(Decimal::new(95, 2))
        .with_delivery("60 mins")
        .with_rating(4.1)
}

fn supertails() -> Platform {
    Platform::new("supertails", "Supertails", "https://supertails.com", "#2D9CDB")
        .with_multiplier(Decimal::new(98, 2))
        .with_delivery("2-4 days")
        .with_rating(4.2)
        .with_discounts(&["Free vet consult with orders"])
}

fn heads_up_for_tails() -> Platform {
    Platform::new("huft", "Heads Up For Tails", "https://headsupfortails.com", "#F2994A")
        .with_multiplier(Decimal::new(104, 2))
        .with_delivery("3-5 days")
        .with_rating(4.3)
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    category: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    id: String,
    name: String,
    #[serde(default)]
    known_keywords: Vec<String>,
    result_cap: Option<usize>,
    price_min: Option<Decimal>,
    price_max: Option<Decimal>,
    default_item_name: Option<String>,
    #[serde(default)]
    platform: Vec<PlatformEntry>,
}

#[derive(Debug, Deserialize)]
struct PlatformEntry {
    id: String,
    name: String,
    url: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    features: Vec<String>,
    price_multiplier: Option<Decimal>,
    delivery_time: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    discounts: Vec<String>,
}

fn default_color() -> String {
    "#666666".to_string()
}

impl CategoryEntry {
    fn into_category(self) -> Category {
        let mut category = Category::new(self.id, self.name);
        category.known_keywords = self.known_keywords;
        if let Some(result_cap) = self.result_cap {
            category.result_cap = result_cap;
        }
        if let Some(price_min) = self.price_min {
            category.price_range.0 = price_min;
        }
        if let Some(price_max) = self.price_max {
            category.price_range.1 = price_max;
        }
        if let Some(default_item_name) = self.default_item_name {
            category.default_item_name = default_item_name;
        }
        category.platforms = self.platform.into_iter().map(PlatformEntry::into_platform).collect();
        category
    }
}

impl PlatformEntry {
    fn into_platform(self) -> Platform {
        let mut platform = Platform::new(self.id, self.name, self.url, self.color);
        platform.features = self.features;
        if let Some(price_multiplier) = self.price_multiplier {
            platform.price_multiplier = price_multiplier;
        }
        platform.delivery_time = self.delivery_time;
        platform.rating = self.rating;
        platform.discounts = self.discounts;
        platform
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::domain::category::{Category, CategoryId};
    use crate::domain::platform::Platform;

    use super::{CatalogError, CategoryCatalog};

    #[test]
    fn builtin_catalog_covers_the_known_categories() {
        let catalog = CategoryCatalog::builtin();
        assert!(catalog.len() >= 25, "expected a full catalog, got {}", catalog.len());

        for id in ["entertainment", "food-delivery", "cryptocurrency", "flights", "groceries"] {
            let category = catalog
                .find(&CategoryId(id.to_string()))
                .unwrap_or_else(|| panic!("missing builtin category {id}"));
            assert!(!category.platforms.is_empty());
            assert!(category.result_cap >= 1);
            assert!(category.price_range.0 <= category.price_range.1);
        }
    }

    #[test]
    fn builtin_platform_lists_stay_within_catalog_bounds() {
        let catalog = CategoryCatalog::builtin();
        for category in catalog.iter() {
            assert!(
                (2..=6).contains(&category.platforms.len()),
                "category {} has {} platforms",
                category.id,
                category.platforms.len()
            );
        }
    }

    #[test]
    fn crypto_category_lists_exactly_three_exchanges() {
        let catalog = CategoryCatalog::builtin();
        let crypto = catalog.find(&CategoryId("cryptocurrency".to_string())).expect("builtin");
        assert_eq!(crypto.platforms.len(), 3);
        assert!(crypto.platforms.iter().all(|platform| platform.delivery_time.as_deref()
            == Some("Instant")));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let duplicate_categories =
            vec![Category::new("books", "Books"), Category::new("books", "Books Again")];
        assert!(matches!(
            CategoryCatalog::new(duplicate_categories),
            Err(CatalogError::DuplicateCategory(id)) if id == "books"
        ));

        let duplicate_platforms = vec![Category::new("books", "Books").with_platforms(vec![
            Platform::new("amazon", "Amazon", "https://a.example", "#111"),
            Platform::new("amazon", "Amazon Again", "https://b.example", "#222"),
        ])];
        assert!(matches!(
            CategoryCatalog::new(duplicate_platforms),
            Err(CatalogError::DuplicatePlatform { .. })
        ));
    }

    #[test]
    fn toml_catalog_merges_over_builtin() {
        let raw = r##"
[[category]]
id = "drones"
name = "Drones"
known_keywords = ["quadcopter", "fpv"]
result_cap = 4
price_min = 5000
price_max = 90000

[[category.platform]]
id = "amazon"
name = "Amazon"
url = "https://www.amazon.in"
color = "#FF9900"
delivery_time = "2-3 days"
rating = 4.4

[[category.platform]]
id = "flipkart"
name = "Flipkart"
url = "https://www.flipkart.com"
"##;

        let extra = CategoryCatalog::from_toml_str(raw).expect("valid catalog toml");
        assert_eq!(extra.len(), 1);

        let builtin_len = CategoryCatalog::builtin().len();
        let merged = CategoryCatalog::builtin().merge(extra);
        assert_eq!(merged.len(), builtin_len + 1);

        let drones = merged.find(&CategoryId("drones".to_string())).expect("merged category");
        assert_eq!(drones.platforms.len(), 2);
        assert_eq!(drones.platforms[1].color, "#666666");
        assert_eq!(drones.result_cap, 4);
    }

    #[test]
    fn merge_replaces_same_id_categories() {
        let replacement = CategoryCatalog::new(vec![Category::new("books", "Books, Rebuilt")
            .with_platforms(vec![Platform::new(
                "libris",
                "Libris",
                "https://libris.example",
                "#123123",
            )])])
        .expect("valid");

        let builtin_len = CategoryCatalog::builtin().len();
        let merged = CategoryCatalog::builtin().merge(replacement);
        assert_eq!(merged.len(), builtin_len);

        let books = merged.find(&CategoryId("books".to_string())).expect("books");
        assert_eq!(books.name, "Books, Rebuilt");
        assert_eq!(books.platforms.len(), 1);
    }

    #[test]
    fn load_reads_and_merges_a_catalog_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
[[category]]
id = "drones"
name = "Drones"

[[category.platform]]
id = "amazon"
name = "Amazon"
url = "https://www.amazon.in"
"#,
        )
        .expect("write catalog");

        let catalog = CategoryCatalog::load(&path).expect("load catalog");
        assert!(catalog.find(&CategoryId("drones".to_string())).is_some());
        assert!(catalog.find(&CategoryId("flights".to_string())).is_some());

        let missing = CategoryCatalog::load(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(CatalogError::ReadFile { .. })));
    }
}
