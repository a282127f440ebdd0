// src/bin/poker_ledger_dev_cli.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use poker_ledger::api::{
    build_table_view, BuyInCommand, Command, CommandResponse, CreateTableCommand, DealCardsCommand,
    PlayHandCommand, RevealCommunityCommand, ShowdownCommand,
};
use poker_ledger::domain::{Chips, PlayerId, TableId, TokenId};
use poker_ledger::engine::{ActionKind, RoundOutcome};
use poker_ledger::eval::{describe_hand, SevenCardEvaluator};
use poker_ledger::infra::{Dealer, DealtHand, DeterministicRng, RandomSource, SystemRng};
use poker_ledger::ports::InMemoryToken;
use poker_ledger::{LedgerConfig, PokerLedger};

const OPERATOR: PlayerId = 0;
const TOKEN: TokenId = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "Локальный прогон раздач покерного леджера")]
struct Args {
    /// Сколько игроков посадить за стол.
    #[arg(short, long, default_value_t = 3)]
    players: u8,

    /// Сколько раздач сыграть.
    #[arg(long, default_value_t = 1)]
    hands: u32,

    /// Бай-ин каждого игрока.
    #[arg(long, default_value_t = 150)]
    buy_in: u128,

    #[arg(long, default_value_t = 10)]
    big_blind: u128,

    /// Seed для детерминированной раздачи; без него – системный RNG.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON-конфиг леджера; без него оператор = 0.
    #[arg(long)]
    config: Option<PathBuf>,
}

type Ledger = PokerLedger<InMemoryToken, SevenCardEvaluator>;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match &args.config {
        Some(path) => LedgerConfig::from_path(path)?,
        None => LedgerConfig::new(OPERATOR),
    };
    let operator = config.operator;
    let mut ledger = Ledger::new(config, InMemoryToken::new(), SevenCardEvaluator)?;

    let players: Vec<PlayerId> = (1..=u64::from(args.players)).map(|p| p + operator).collect();
    let buy_in = Chips::new(args.buy_in);

    let table_id = match ledger.execute(
        operator,
        Command::CreateTable(CreateTableCommand {
            buy_in,
            max_players: args.players,
            big_blind: Chips::new(args.big_blind),
            token: TOKEN,
        }),
    )? {
        CommandResponse::TableCreated { table_id } => table_id,
        other => return Err(format!("неожиданный ответ: {other:?}").into()),
    };

    for player in &players {
        ledger.token_mut().mint(TOKEN, *player, buy_in)?;
        ledger.token_mut().approve(TOKEN, *player, buy_in);
        ledger.execute(
            *player,
            Command::BuyIn(BuyInCommand {
                table_id,
                amount: buy_in,
            }),
        )?;
    }

    info!(table_id, players = players.len(), "table ready");

    match args.seed {
        Some(seed) => run_hands(&mut ledger, table_id, args.hands, Dealer::new(DeterministicRng::from_seed(seed)))?,
        None => run_hands(&mut ledger, table_id, args.hands, Dealer::new(SystemRng))?,
    }

    let audit = ledger.audit(table_id)?;
    println!();
    println!("================ ИТОГ =================");
    print_table(&ledger, table_id)?;
    println!(
        "Аудит: фишки={} банк={} внесено={} выведено={} сходится={}",
        audit.chips_total, audit.pot, audit.deposited, audit.withdrawn, audit.balanced
    );
    Ok(())
}

fn run_hands<R: RandomSource>(
    ledger: &mut Ledger,
    table_id: TableId,
    hands: u32,
    mut dealer: Dealer<R>,
) -> Result<(), Box<dyn Error>> {
    for n in 0..hands {
        let seated = ledger.table(table_id)?.players.len();
        if seated < 2 {
            println!("За столом меньше двух игроков – останавливаемся.");
            break;
        }
        println!();
        println!("================ РАЗДАЧА #{n} =================");
        let dealt = dealer.deal(seated)?;
        play_one_hand(ledger, table_id, &dealt)?;
        print_table(ledger, table_id)?;
    }
    Ok(())
}

fn play_one_hand(ledger: &mut Ledger, table_id: TableId, dealt: &DealtHand) -> Result<(), Box<dyn Error>> {
    let operator = ledger.config().operator;

    ledger.execute(
        operator,
        Command::DealCards(DealCardsCommand {
            table_id,
            hole: dealt.hole_hashes.clone(),
            community: dealt.community_hashes,
        }),
    )?;

    let streets = [Vec::new(), dealt.flop(), dealt.turn(), dealt.river()];
    for (street, reveal) in streets.into_iter().enumerate() {
        if street > 0 {
            ledger.execute(
                operator,
                Command::RevealCommunity(RevealCommunityCommand {
                    table_id,
                    reveals: reveal,
                }),
            )?;
        }
        if !bet_street(ledger, table_id, street == 0)? {
            println!("Раздача закончилась без шоудауна.");
            return Ok(());
        }
    }

    let response = ledger.execute(
        operator,
        Command::Showdown(ShowdownCommand {
            table_id,
            keys: dealt.keys.clone(),
            hole_cards: dealt.hole.clone(),
            community: Vec::new(),
        }),
    )?;
    if let CommandResponse::Showdown(summary) = response {
        let board: Vec<String> = summary.board.iter().map(ToString::to_string).collect();
        println!("Борд: {}", board.join(" "));
        for p in &summary.players {
            println!(
                "  игрок {:>3}: {:<24} выплата={}{}",
                p.player_id,
                describe_hand(p.rank),
                p.payout,
                if p.is_winner { "  <- победитель" } else { "" }
            );
        }
    }
    Ok(())
}

/// Простая стратегия: на префлопе первый ход – рейз на большой блайнд,
/// дальше все коллируют или чекают; без фишек на колл – фолд.
/// Возвращает false, если раздача закончилась фолдами.
fn bet_street(ledger: &mut Ledger, table_id: TableId, preflop: bool) -> Result<bool, Box<dyn Error>> {
    let round_index = ledger.table(table_id)?.current_round;
    loop {
        let round = ledger.round(table_id, round_index)?;
        if round.is_complete() {
            return Ok(true);
        }
        let player = round.current_turn;
        let to_call = round.to_call(player);
        let opening = round.highest_chip.is_zero();
        let stack = ledger.chips(player, table_id)?;
        let big_blind = ledger.table(table_id)?.config.big_blind;

        let (kind, amount) = if !to_call.is_zero() {
            if stack >= to_call {
                (ActionKind::Call, Chips::ZERO)
            } else {
                (ActionKind::Fold, Chips::ZERO)
            }
        } else if preflop && opening && stack >= big_blind {
            (ActionKind::Raise, big_blind)
        } else {
            (ActionKind::Check, Chips::ZERO)
        };

        let response = ledger.execute(
            player,
            Command::PlayHand(PlayHandCommand {
                table_id,
                action_kind: kind as u8,
                amount,
            }),
        )?;
        println!("  игрок {player:>3}: {kind:?} {amount}");

        if let CommandResponse::ActionAccepted {
            outcome: RoundOutcome::LastPlayerStanding(winner),
            ..
        } = response
        {
            println!("  игрок {winner} забирает банк");
            return Ok(false);
        }
    }
}

fn print_table(ledger: &Ledger, table_id: TableId) -> Result<(), Box<dyn Error>> {
    let view = build_table_view(ledger.table(table_id)?, ledger.state());
    println!(
        "Стол {} | {:?} | раздач сыграно: {} | банк: {}",
        view.table_id, view.state, view.hands_played, view.pot
    );
    for p in &view.players {
        println!("  место {} – игрок {:>3}: {} фишек", p.seat_index, p.player_id, p.chips);
    }
    Ok(())
}
